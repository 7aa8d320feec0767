// Domain layer - grid, rule, seeding
pub mod domain;

// Application layer - lifecycle, timers, configuration
pub mod application;

// Infrastructure layer - rendering and input on macroquad
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, Grid, GridError, ImageSeeder, SeedError, SourceImage, StepStrategy};
pub use application::{Phase, Scheduler, SimulationConfig, Viewport};
