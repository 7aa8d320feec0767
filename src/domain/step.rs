//! Generation step for the loading-screen automaton.
//!
//! Neighbor counting keeps the historical edge exclusion of the loading
//! screen: a neighbor at column 0 or row 0 is never counted, while the far
//! edges (`width - 1`, `height - 1`) are. There is no toroidal wrapping.

use rayon::prelude::*;

use super::{Cell, Grid, GridError, StepStrategy};

/// Count living cells in the Moore neighborhood of `(x, y)`.
/// Neighbors with `x <= 0` or `y <= 0` are excluded.
pub fn count_neighbours(x: usize, y: usize, grid: &Grid) -> u8 {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    let (x, y) = (x as i64, y as i64);

    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .map(|(dx, dy)| (x + dx, y + dy))
        .filter(|&(nx, ny)| nx > 0 && ny > 0 && nx < w && ny < h)
        .filter(|&(nx, ny)| grid.is_alive_at(nx as usize, ny as usize))
        .count() as u8
}

fn check(grid: &Grid) -> Result<(), GridError> {
    if grid.is_well_formed() {
        Ok(())
    } else {
        Err(GridError::InvalidGrid(format!(
            "storage does not match {}x{} dimensions",
            grid.width(),
            grid.height()
        )))
    }
}

/// Compute the next generation (serial).
/// Every neighbor count reads `grid`, never the generation being built.
pub fn next(grid: &Grid) -> Result<Grid, GridError> {
    check(grid)?;
    let (w, h) = grid.dimensions();

    let cells = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .map(|(x, y)| evolve_at(grid, x, y))
        .collect();

    Ok(Grid::from_cells(w, h, cells))
}

/// Compute the next generation with rows spread over the rayon pool.
/// Produces exactly the same grid as [`next`].
pub fn next_parallel(grid: &Grid) -> Result<Grid, GridError> {
    check(grid)?;
    let (w, h) = grid.dimensions();

    let mut cells = vec![Cell::DEAD; w * h];
    cells
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = evolve_at(grid, x, y);
            }
        });

    Ok(Grid::from_cells(w, h, cells))
}

/// Dispatch to the selected strategy
pub fn advance(grid: &Grid, strategy: StepStrategy) -> Result<Grid, GridError> {
    match strategy {
        StepStrategy::Serial => next(grid),
        StepStrategy::Parallel => next_parallel(grid),
    }
}

#[inline]
fn evolve_at(grid: &Grid, x: usize, y: usize) -> Cell {
    // Bounds come from the grid's own dimensions.
    let current = grid.get(x, y).unwrap_or_default();
    current.evolve(count_neighbours(x, y, grid))
}
