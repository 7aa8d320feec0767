use std::time::Duration;

use crate::domain::{
    ImageSeeder, StepStrategy,
    seeder::{DEFAULT_FOOTPRINT_WIDTH, DEFAULT_LUMINANCE_THRESHOLD, DEFAULT_NOISE_POINTS},
};

/// Number of grid columns, whatever the viewport width
pub const DEFAULT_GRID_WIDTH_UNITS: usize = 100;
/// Time the seeded image stays frozen on screen
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(3000);
/// Time between generations
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Knobs of the loading screen
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub grid_width_units: usize,
    pub noise_points: usize,
    pub debug_overlay: bool,
    pub start_delay: Duration,
    pub tick_period: Duration,
    pub footprint_width: u32,
    pub luminance_threshold: u32,
    pub strategy: StepStrategy,
    /// Re-enable drawing after a reseed instead of leaving the new seed frozen
    pub resume_on_reseed: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width_units: DEFAULT_GRID_WIDTH_UNITS,
            noise_points: DEFAULT_NOISE_POINTS,
            debug_overlay: false,
            start_delay: DEFAULT_START_DELAY,
            tick_period: DEFAULT_TICK_PERIOD,
            footprint_width: DEFAULT_FOOTPRINT_WIDTH,
            luminance_threshold: DEFAULT_LUMINANCE_THRESHOLD,
            strategy: StepStrategy::default(),
            resume_on_reseed: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_grid_width_units(mut self, units: usize) -> Self {
        self.grid_width_units = units.max(1);
        self
    }

    pub fn with_noise_points(mut self, noise_points: usize) -> Self {
        self.noise_points = noise_points;
        self
    }

    pub fn with_debug_overlay(mut self, debug_overlay: bool) -> Self {
        self.debug_overlay = debug_overlay;
        self
    }

    pub fn with_start_delay(mut self, start_delay: Duration) -> Self {
        self.start_delay = start_delay;
        self
    }

    /// A zero period would fire on every frame; it is clamped to 1 ms.
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period.max(Duration::from_millis(1));
        self
    }

    pub fn with_footprint_width(mut self, footprint_width: u32) -> Self {
        self.footprint_width = footprint_width.max(1);
        self
    }

    pub fn with_luminance_threshold(mut self, luminance_threshold: u32) -> Self {
        self.luminance_threshold = luminance_threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: StepStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_resume_on_reseed(mut self, resume_on_reseed: bool) -> Self {
        self.resume_on_reseed = resume_on_reseed;
        self
    }

    /// Seeder matching this configuration
    pub fn seeder(&self) -> ImageSeeder {
        ImageSeeder::new(self.noise_points).with_threshold(self.luminance_threshold)
    }
}
