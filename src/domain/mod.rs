mod cell;
mod grid;
pub mod patterns;
mod strategy;
pub mod seeder;
pub mod step;

pub use cell::{Cell, Rgb};
pub use grid::{Grid, GridError};
pub use patterns::Pattern;
pub use seeder::{ImageSeeder, SeedError, SourceImage};
pub use strategy::StepStrategy;
