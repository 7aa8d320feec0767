use thiserror::Error;

use super::Cell;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

/// Grid is one generation of the automaton.
/// Snapshots are immutable from the outside: every change yields a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells dead.
    /// Zero dimensions are clamped to 1.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            cells: vec![Cell::DEAD; width * height],
        }
    }

    /// Create a new grid, rejecting zero dimensions
    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidGrid(format!(
                "dimensions must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self::new(width, height))
    }

    /// Build a grid from rows (`rows[y][x]`). Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::InvalidGrid("grid has no cells".to_owned()));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(GridError::InvalidGrid(format!(
                "row {y} has {} cells, expected {width}",
                row.len()
            )));
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Crate-internal constructor used by the step engine
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    /// Storage that disagrees with the dimensions, to exercise step validation
    #[cfg(test)]
    pub(crate) fn malformed(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        Self { width, height, cells }
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// The backing storage agrees with the dimensions
    pub fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0 && self.cells.len() == self.width * self.height
    }

    fn index_of(&self, x: i64, y: i64) -> Result<usize, GridError> {
        let in_range = x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        if !in_range {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width + x as usize)
    }

    /// Get cell at position
    pub fn get(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        self.index_of(x as i64, y as i64).map(|idx| self.cells[idx])
    }

    /// Liveness lookup used by the neighbor count; callers guarantee the bounds
    #[inline]
    pub(crate) fn is_alive_at(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x].living
    }

    /// Return a copy of this grid with `(x, y)` replaced
    pub fn with_cell(&self, x: usize, y: usize, cell: Cell) -> Result<Self, GridError> {
        let idx = self.index_of(x as i64, y as i64)?;
        let mut next = self.clone();
        next.cells[idx] = cell;
        Ok(next)
    }

    /// In-place write for grids still under construction (seeding, pattern placement).
    /// Never called on a published snapshot.
    pub(crate) fn put(&mut self, x: i64, y: i64, cell: Cell) -> Result<(), GridError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Number of living cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.living).count()
    }

    /// Iterate over all cells with their positions, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (idx % self.width, idx / self.width, *cell))
    }

    /// Iterate over living cells only
    pub fn living_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.iter_cells().filter(|(_, _, cell)| cell.living)
    }
}
