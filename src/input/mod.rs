use macroquad::prelude::*;
use tracing::{info, warn};

use crate::application::Scheduler;
use crate::domain::{Grid, SeedError};

/// Left click brings the cell under the cursor to life
pub fn handle_click(scheduler: &mut Scheduler) {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }

    let (mx, my) = mouse_position();
    let units = scheduler.config().grid_width_units;
    let (grid_x, grid_y) = scheduler.viewport().screen_to_grid(mx, my, units);
    if grid_x < 0 || grid_y < 0 {
        warn!(grid_x, grid_y, "Click outside the grid");
        return;
    }

    match scheduler.revive(grid_x as usize, grid_y as usize) {
        Ok(true) => info!(grid_x, grid_y, "Cell revived"),
        Ok(false) => {}
        Err(err) => warn!(%err, "Click outside the grid"),
    }
}

/// Space toggles the display (reseeding when it was off), D switches drawing
/// without reseeding, P pauses/resumes.
pub fn handle_keys<F>(scheduler: &mut Scheduler, reseed: F) -> Result<(), SeedError>
where
    F: FnOnce(usize, usize) -> Result<Grid, SeedError>,
{
    if is_key_pressed(KeyCode::P) && !scheduler.pause() {
        scheduler.resume();
    }
    if is_key_pressed(KeyCode::D) {
        let drawing = !scheduler.is_drawing();
        scheduler.set_drawing(drawing);
        info!(drawing, "Drawing switched");
    }
    if is_key_pressed(KeyCode::Space) {
        scheduler.toggle_display(reseed)?;
    }
    Ok(())
}
