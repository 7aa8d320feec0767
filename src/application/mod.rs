mod config;
mod scheduler;
mod timer;
mod viewport;

pub use config::{SimulationConfig, DEFAULT_GRID_WIDTH_UNITS, DEFAULT_START_DELAY, DEFAULT_TICK_PERIOD};
pub use scheduler::{Phase, Scheduler, seed_from_bytes};
pub use timer::{Delay, Ticker};
pub use viewport::Viewport;
