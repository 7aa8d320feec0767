/// An RGB triple taken from the seed image.
pub type Rgb = [u8; 3];

/// Cell represents the fundamental unit of the loading-screen automaton.
/// The color is only used for rendering, the rule never reads it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub living: bool,
    pub color: Option<Rgb>,
}

impl Cell {
    /// A dead, colorless cell
    pub const DEAD: Cell = Cell { living: false, color: None };

    /// A living cell without color (noise and newborn cells)
    pub const fn alive() -> Self {
        Self { living: true, color: None }
    }

    /// A living cell painted with a source pixel
    pub const fn colored(color: Rgb) -> Self {
        Self { living: true, color: Some(color) }
    }

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.living
    }

    /// Pure function to compute the next state based on Conway's rules (B3/S23):
    /// 1. Live cell with 2-3 neighbors survives and keeps its color
    /// 2. Dead cell with exactly 3 neighbors is born without color
    /// 3. All other cases result in death (color is kept, it is never drawn)
    pub const fn evolve(self, neighbors: u8) -> Self {
        match (self.living, neighbors) {
            (true, 2 | 3) => self,
            (false, 3) => Cell::alive(),
            (true, _) => Cell { living: false, color: self.color },
            (false, _) => self,
        }
    }
}
