//! Step strategy selection.
//!
//! Both strategies compute the same generation; the parallel one spreads
//! rows over the rayon pool and only pays off on large grids.

/// Available step implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepStrategy {
    /// Cell-by-cell, single thread
    #[default]
    Serial,
    /// Row-parallel with rayon
    Parallel,
}

impl StepStrategy {
    /// Get all available strategies
    pub fn all() -> Vec<StepStrategy> {
        vec![StepStrategy::Serial, StepStrategy::Parallel]
    }

    /// Display name for logs and the benchmark table
    pub fn name(&self) -> &'static str {
        match self {
            StepStrategy::Serial => "Serial",
            StepStrategy::Parallel => "Parallel",
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            StepStrategy::Serial => "Cell-by-cell, one thread",
            StepStrategy::Parallel => "Rows split across the rayon pool",
        }
    }
}
