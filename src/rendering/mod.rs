use macroquad::prelude::*;

use crate::application::{Scheduler, Viewport};
use crate::domain::{Grid, Rgb};

/// Color of living cells that carry no image color
const NOISE_COLOR: Color = Color::new(0.25, 0.25, 0.3, 1.0);
const GRID_LINE_COLOR: Color = Color::new(0.85, 0.85, 0.85, 1.0);
pub const BACKGROUND: Color = WHITE;

fn to_color([r, g, b]: Rgb) -> Color {
    Color::from_rgba(r, g, b, 255)
}

/// Draw every living cell of the snapshot as a square
pub fn draw_grid(grid: &Grid, viewport: &Viewport, units: usize, debug_overlay: bool) {
    let cell_size = viewport.cell_size(units);
    let (grid_width, grid_height) = grid.dimensions();

    for (x, y, cell) in grid.living_cells() {
        let (screen_x, screen_y) = viewport.grid_to_screen(x, y, units);
        if screen_x > viewport.width || screen_y > viewport.height {
            continue;
        }
        let color = cell.color.map_or(NOISE_COLOR, to_color);
        draw_rectangle(screen_x, screen_y, cell_size, cell_size, color);
    }

    if debug_overlay {
        for x in 0..=grid_width {
            let sx = x as f32 * cell_size;
            draw_line(sx, 0.0, sx, grid_height as f32 * cell_size, 1.0, GRID_LINE_COLOR);
        }
        for y in 0..=grid_height {
            let sy = y as f32 * cell_size;
            draw_line(0.0, sy, grid_width as f32 * cell_size, sy, 1.0, GRID_LINE_COLOR);
        }
    }
}

/// Phase and generation in the corner, debug overlay only
pub fn draw_debug_info(scheduler: &Scheduler) {
    let living = scheduler.grid().map_or(0, Grid::live_count);
    let text = format!(
        "{:?}  gen {}  living {}  fps {}",
        scheduler.phase(),
        scheduler.generation(),
        living,
        get_fps()
    );
    draw_text(&text, 10.0, 20.0, 20.0, DARKGRAY);
}

/// Draw the current frame of the loading screen
pub fn draw_frame(scheduler: &Scheduler) {
    clear_background(BACKGROUND);

    let config = scheduler.config();
    if let Some(grid) = scheduler.snapshot() {
        draw_grid(&grid, &scheduler.viewport(), config.grid_width_units, config.debug_overlay);
    }
    if config.debug_overlay {
        draw_debug_info(scheduler);
    }
}
