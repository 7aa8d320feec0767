/// Viewport in screen pixels; only used to size the grid and its cells
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grid columns and rows: `units` columns, rows following the aspect ratio
    /// (truncated, at least 1)
    pub fn grid_dimensions(&self, units: usize) -> (usize, usize) {
        let units = units.max(1);
        if self.width <= 0.0 || self.height <= 0.0 {
            return (units, 1);
        }
        let rows = (units as f64 * (self.height as f64 / self.width as f64)) as usize;
        (units, rows.max(1))
    }

    /// Side of one square cell in pixels
    pub fn cell_size(&self, units: usize) -> f32 {
        self.width / units.max(1) as f32
    }

    /// Convert screen coordinates to grid coordinates
    pub fn screen_to_grid(&self, screen_x: f32, screen_y: f32, units: usize) -> (i32, i32) {
        let size = self.cell_size(units);
        ((screen_x / size).floor() as i32, (screen_y / size).floor() as i32)
    }

    /// Convert grid coordinates to screen coordinates
    pub fn grid_to_screen(&self, grid_x: usize, grid_y: usize, units: usize) -> (f32, f32) {
        let size = self.cell_size(units);
        (grid_x as f32 * size, grid_y as f32 * size)
    }
}
