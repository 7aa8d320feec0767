//! Fixed shapes used to build test fixtures

use super::{Cell, Grid};

/// Living cells of a shape, relative to its top-left corner
#[derive(Clone, Copy, Debug)]
pub struct Pattern(pub &'static [(usize, usize)]);

/// 2x2 still life
pub const BLOCK: Pattern = Pattern(&[(0, 0), (1, 0), (0, 1), (1, 1)]);

/// Horizontal period-2 oscillator
pub const BLINKER: Pattern = Pattern(&[(0, 0), (1, 0), (2, 0)]);

/// Spaceship moving one cell down-right every 4 generations
pub const GLIDER: Pattern = Pattern(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);

impl Pattern {
    /// Return a copy of `grid` with the pattern stamped at `(x, y)`.
    /// Cells falling outside the grid are dropped.
    pub fn place_on(&self, grid: &Grid, x: usize, y: usize) -> Grid {
        // Anchors beyond i64 saturate, which is always off the grid.
        let offset = |origin: usize, delta: usize| {
            i64::try_from(origin)
                .unwrap_or(i64::MAX)
                .saturating_add(i64::try_from(delta).unwrap_or(i64::MAX))
        };

        let mut next = grid.clone();
        for &(dx, dy) in self.0 {
            let _ = next.put(offset(x, dx), offset(y, dy), Cell::alive());
        }
        next
    }
}
