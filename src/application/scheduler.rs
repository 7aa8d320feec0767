use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{info, trace};

use super::timer::{Delay, Ticker};
use super::{SimulationConfig, Viewport};
use crate::domain::{Cell, Grid, GridError, SeedError, SourceImage, step};

/// Lifecycle phase of the loading screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the seed image
    Seeding,
    /// Seed shown frozen until the start delay elapses
    StaticDisplay,
    /// A generation is computed every tick period
    Running,
    /// Frozen, grid kept
    Paused,
}

/// Scheduler orchestrates the simulation.
/// It is the only owner of the current generation and swaps whole snapshots,
/// so a reader holding an `Arc<Grid>` never sees a half-built grid.
pub struct Scheduler {
    config: SimulationConfig,
    viewport: Viewport,
    phase: Phase,
    grid: Option<Arc<Grid>>,
    delay: Option<Delay>,
    ticker: Option<Ticker>,
    drawing: bool,
    stopped: bool,
    generation: u64,
}

impl Scheduler {
    /// Create a scheduler waiting for its seed
    pub fn new(config: SimulationConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            phase: Phase::Seeding,
            grid: None,
            delay: None,
            ticker: None,
            drawing: true,
            stopped: false,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Store new viewport dimensions. The grid keeps its size until reseeded.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Grid size for the current viewport
    pub fn grid_dimensions(&self) -> (usize, usize) {
        self.viewport.grid_dimensions(self.config.grid_width_units)
    }

    /// Cell side in pixels for the renderer
    pub fn cell_size(&self) -> f32 {
        self.viewport.cell_size(self.config.grid_width_units)
    }

    /// Current generation, if seeding has completed
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_deref()
    }

    /// Shared handle on the current generation
    pub fn snapshot(&self) -> Option<Arc<Grid>> {
        self.grid.clone()
    }

    /// Generations computed since the last (re)seed
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// While disabled, running ticks leave the grid frozen
    pub fn set_drawing(&mut self, drawing: bool) {
        self.drawing = drawing;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Install the seeded grid. From `Seeding` this enters `StaticDisplay`
    /// and arms the start delay; later it only replaces the grid.
    pub fn complete_seeding(&mut self, grid: Grid) {
        self.grid = Some(Arc::new(grid));
        self.generation = 0;

        if self.phase == Phase::Seeding {
            self.phase = Phase::StaticDisplay;
            self.delay = Some(Delay::new(self.config.start_delay));
            info!(
                delay_ms = self.config.start_delay.as_millis() as u64,
                "Seed ready, showing static display"
            );
        }
    }

    /// Replace the grid with a fresh seed. Drawing is turned off, so the new
    /// seed stays frozen, unless `resume_on_reseed` is configured.
    /// The phase is left unchanged.
    pub fn reseed(&mut self, grid: Grid) {
        self.grid = Some(Arc::new(grid));
        self.generation = 0;
        self.drawing = self.config.resume_on_reseed;
        info!(phase = ?self.phase, drawing = self.drawing, "Reseeded");
    }

    /// Display toggle: stops drawing when on, otherwise reseeds through
    /// `reseed` (called with the grid dimensions).
    pub fn toggle_display<F>(&mut self, reseed: F) -> Result<(), SeedError>
    where
        F: FnOnce(usize, usize) -> Result<Grid, SeedError>,
    {
        if self.drawing {
            self.drawing = false;
            info!("Drawing disabled");
            return Ok(());
        }

        let (width, height) = self.grid_dimensions();
        let grid = reseed(width, height)?;
        self.reseed(grid);
        Ok(())
    }

    /// Freeze a running simulation. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        info!(generation = self.generation, "Paused");
        true
    }

    /// Resume a paused simulation. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        info!(generation = self.generation, "Resumed");
        true
    }

    /// Bring the cell at `(x, y)` to life, keeping its color.
    /// Returns `Ok(false)` while there is no grid yet.
    pub fn revive(&mut self, x: usize, y: usize) -> Result<bool, GridError> {
        let Some(grid) = self.grid.as_ref() else {
            return Ok(false);
        };
        let cell = grid.get(x, y)?;
        let next = grid.with_cell(x, y, Cell { living: true, ..cell })?;
        self.grid = Some(Arc::new(next));
        Ok(true)
    }

    /// Feed elapsed wall-clock time. Returns whether a generation was computed.
    ///
    /// Nothing is stepped before seeding completes, during the static display,
    /// while paused or after [`stop`](Self::stop).
    pub fn tick(&mut self, elapsed: Duration) -> Result<bool, GridError> {
        if self.stopped {
            return Ok(false);
        }

        match self.phase {
            Phase::Seeding | Phase::Paused => Ok(false),
            Phase::StaticDisplay => {
                let overshoot = match self.delay.as_mut() {
                    Some(delay) => {
                        if delay.advance(elapsed) { Some(delay.overshoot()) } else { None }
                    }
                    None => None,
                };
                if let Some(overshoot) = overshoot {
                    self.start_running(overshoot);
                }
                Ok(false)
            }
            Phase::Running => {
                let fired = self.ticker.as_mut().is_some_and(|ticker| ticker.poll(elapsed));
                if fired && self.drawing {
                    self.step()?;
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    /// `overshoot` is the time already past the delay; the ticker starts
    /// with it on the clock.
    fn start_running(&mut self, overshoot: Duration) {
        self.phase = Phase::Running;
        // The ticker is created once for the whole lifecycle.
        if self.ticker.is_none() {
            self.ticker = Some(Ticker::start_with(self.config.tick_period, overshoot));
        }
        info!("Static display over, simulation running");
    }

    fn step(&mut self) -> Result<(), GridError> {
        let Some(current) = self.grid.as_ref() else {
            return Ok(());
        };
        let next = step::advance(current, self.config.strategy)?;
        self.grid = Some(Arc::new(next));
        self.generation += 1;
        trace!(generation = self.generation, "Stepped");
        Ok(())
    }

    /// Tear down: cancels the periodic timer; further ticks are no-ops.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.cancel();
        }
        self.stopped = true;
    }

    /// Whether the periodic timer is currently registered
    pub fn has_active_ticker(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_active)
    }
}

/// Decode `bytes`, shrink to the configured footprint and seed a
/// `width x height` grid.
pub fn seed_from_bytes<R: Rng + ?Sized>(
    bytes: &[u8],
    config: &SimulationConfig,
    (width, height): (usize, usize),
    rng: &mut R,
) -> Result<Grid, SeedError> {
    let image = SourceImage::decode(bytes, config.footprint_width)?;
    config.seeder().seed(&image, width, height, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patterns::BLINKER;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn blinker_grid() -> Grid {
        BLINKER.place_on(&Grid::new(5, 5), 1, 2)
    }

    fn scheduler() -> Scheduler {
        let config = SimulationConfig::default()
            .with_start_delay(ms(300))
            .with_tick_period(ms(100));
        Scheduler::new(config, Viewport::new(500.0, 500.0))
    }

    fn running_scheduler() -> Scheduler {
        let mut scheduler = scheduler();
        scheduler.complete_seeding(blinker_grid());
        scheduler.tick(ms(300)).unwrap();
        assert_eq!(scheduler.phase(), Phase::Running);
        scheduler
    }

    #[test]
    fn test_starts_seeding_and_ignores_ticks() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.phase(), Phase::Seeding);
        assert!(!scheduler.tick(ms(10_000)).unwrap());
        assert!(scheduler.grid().is_none());
        assert_eq!(scheduler.phase(), Phase::Seeding);
    }

    #[test]
    fn test_static_display_freezes_grid() {
        let mut scheduler = scheduler();
        scheduler.complete_seeding(blinker_grid());
        assert_eq!(scheduler.phase(), Phase::StaticDisplay);

        for _ in 0..2 {
            assert!(!scheduler.tick(ms(100)).unwrap());
        }
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));
        assert_eq!(scheduler.phase(), Phase::StaticDisplay);
        assert!(!scheduler.has_active_ticker());
    }

    #[test]
    fn test_delay_then_running_steps() {
        let mut scheduler = scheduler();
        scheduler.complete_seeding(blinker_grid());

        // The transition tick itself does not step.
        assert!(!scheduler.tick(ms(300)).unwrap());
        assert_eq!(scheduler.phase(), Phase::Running);
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));

        assert!(scheduler.tick(ms(100)).unwrap());
        let expected = step::next(&blinker_grid()).unwrap();
        assert_eq!(scheduler.grid(), Some(&expected));
        assert_eq!(scheduler.generation(), 1);

        assert!(!scheduler.tick(ms(50)).unwrap());
        assert!(scheduler.tick(ms(50)).unwrap());
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));
    }

    #[test]
    fn test_drawing_disabled_freezes_but_timer_runs() {
        let mut scheduler = running_scheduler();
        scheduler.set_drawing(false);
        assert!(!scheduler.tick(ms(100)).unwrap());
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));
        assert!(scheduler.has_active_ticker());

        scheduler.set_drawing(true);
        assert!(scheduler.tick(ms(100)).unwrap());
    }

    #[test]
    fn test_snapshot_survives_swap() {
        let mut scheduler = running_scheduler();
        let before = scheduler.snapshot().unwrap();
        scheduler.tick(ms(100)).unwrap();
        let after = scheduler.snapshot().unwrap();

        assert_eq!(*before, blinker_grid());
        assert_ne!(before, after);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut scheduler = running_scheduler();
        assert!(scheduler.pause());
        assert_eq!(scheduler.phase(), Phase::Paused);
        assert!(!scheduler.tick(ms(500)).unwrap());
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));

        assert!(scheduler.resume());
        assert!(scheduler.tick(ms(100)).unwrap());
        assert!(!scheduler.resume());
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut scheduler = scheduler();
        assert!(!scheduler.pause());
        scheduler.complete_seeding(blinker_grid());
        assert!(!scheduler.pause());
        assert_eq!(scheduler.phase(), Phase::StaticDisplay);
    }

    #[test]
    fn test_toggle_display_disables_then_reseeds() {
        let mut scheduler = running_scheduler();
        scheduler.tick(ms(100)).unwrap();

        scheduler.toggle_display(|_, _| unreachable!()).unwrap();
        assert!(!scheduler.is_drawing());

        let mut requested = None;
        scheduler
            .toggle_display(|w, h| {
                requested = Some((w, h));
                Ok(Grid::new(w, h))
            })
            .unwrap();
        assert_eq!(requested, Some((100, 100)));
        assert!(!scheduler.is_drawing());
        assert_eq!(scheduler.phase(), Phase::Running);
        assert_eq!(scheduler.generation(), 0);
        assert_eq!(scheduler.grid().map(Grid::live_count), Some(0));

        // The fresh seed stays frozen until drawing is enabled again.
        let reseeded = scheduler.grid().cloned();
        assert!(!scheduler.tick(ms(100)).unwrap());
        assert_eq!(scheduler.grid().cloned(), reseeded);
    }

    #[test]
    fn test_reseed_can_resume_drawing_when_configured() {
        let config = SimulationConfig::default()
            .with_start_delay(ms(300))
            .with_resume_on_reseed(true);
        let mut scheduler = Scheduler::new(config, Viewport::new(500.0, 500.0));
        scheduler.complete_seeding(blinker_grid());
        scheduler.tick(ms(300)).unwrap();
        scheduler.set_drawing(false);

        scheduler.reseed(blinker_grid());
        assert!(scheduler.is_drawing());
        assert!(scheduler.tick(ms(100)).unwrap());
    }

    #[test]
    fn test_steps_keep_cadence_from_zero_delay() {
        let config = SimulationConfig::default()
            .with_start_delay(Duration::ZERO)
            .with_tick_period(ms(100));
        let mut scheduler = Scheduler::new(config, Viewport::new(500.0, 500.0));
        scheduler.complete_seeding(Grid::new(5, 5));

        let mut steps = 0;
        for _ in 0..375 {
            if scheduler.tick(ms(16)).unwrap() {
                steps += 1;
            }
        }
        // 6 seconds at a 100 ms period, the first 16 ms carried out of the delay.
        assert_eq!(steps, 60);
    }

    #[test]
    fn test_delay_overshoot_counts_toward_first_step() {
        let mut scheduler = scheduler();
        scheduler.complete_seeding(blinker_grid());
        // 90 ms past the 300 ms delay.
        assert!(!scheduler.tick(ms(390)).unwrap());
        assert_eq!(scheduler.phase(), Phase::Running);
        assert!(scheduler.tick(ms(10)).unwrap());
    }

    #[test]
    fn test_toggle_display_surfaces_seed_errors() {
        let mut scheduler = running_scheduler();
        scheduler.set_drawing(false);
        let result = scheduler.toggle_display(|_, _| Err(SeedError::EmptyImage));
        assert!(matches!(result, Err(SeedError::EmptyImage)));
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));
        assert!(!scheduler.is_drawing());
    }

    #[test]
    fn test_reseed_keeps_phase() {
        let mut scheduler = scheduler();
        scheduler.complete_seeding(blinker_grid());
        scheduler.reseed(Grid::new(3, 3));
        assert_eq!(scheduler.phase(), Phase::StaticDisplay);
        assert_eq!(scheduler.grid().map(Grid::dimensions), Some((3, 3)));
    }

    #[test]
    fn test_revive() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.revive(0, 0), Ok(false));

        scheduler.complete_seeding(Grid::new(4, 4));
        assert_eq!(scheduler.revive(2, 3), Ok(true));
        assert!(scheduler.grid().unwrap().get(2, 3).unwrap().is_alive());
        assert!(matches!(
            scheduler.revive(4, 0),
            Err(GridError::OutOfBounds { x: 4, y: 0, .. })
        ));
    }

    #[test]
    fn test_stop_cancels_ticker() {
        let mut scheduler = running_scheduler();
        assert!(scheduler.has_active_ticker());
        scheduler.stop();
        assert!(!scheduler.has_active_ticker());
        assert!(!scheduler.tick(ms(1000)).unwrap());
        assert_eq!(scheduler.grid(), Some(&blinker_grid()));
    }

    #[test]
    fn test_viewport_sizes_grid() {
        let mut scheduler = scheduler();
        scheduler.set_viewport(Viewport::new(1000.0, 250.0));
        assert_eq!(scheduler.grid_dimensions(), (100, 25));
        assert_eq!(scheduler.cell_size(), 10.0);
    }

    #[test]
    fn test_seed_from_bytes_rejects_garbage() {
        let mut rng = rand::rng();
        let result = seed_from_bytes(b"nope", &SimulationConfig::default(), (10, 10), &mut rng);
        assert!(matches!(result, Err(SeedError::ImageDecode(_))));
    }
}
