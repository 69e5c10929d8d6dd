use crate::grid::Cell;
use crate::math::window_to_ndc;
use crate::state::AppState;
use tracing::debug;

/// Half the side of a cell's hit box in normalized coordinates
pub const PICK_HALF_EXTENT: f32 = 0.1;

/// Finds the first cell, row-major, whose hit box contains the window position
pub fn pick_cell(xpos: f64, ypos: f64) -> Option<Cell> {
    let p = window_to_ndc(xpos, ypos);
    Cell::all().find(|cell| {
        let c = cell.center();
        p.x >= c.x - PICK_HALF_EXTENT
            && p.x <= c.x + PICK_HALF_EXTENT
            && p.y >= c.y - PICK_HALF_EXTENT
            && p.y <= c.y + PICK_HALF_EXTENT
    })
}

/// Applies a left press: selects the hit cell or clears the selection on a miss
pub fn resolve_click(state: &mut AppState, xpos: f64, ypos: f64) {
    match pick_cell(xpos, ypos) {
        Some(cell) => {
            debug!(i = cell.i, j = cell.j, index = cell.index(), "sphere selected");
            state.select(cell.index());
        }
        None => {
            debug!(xpos, ypos, "click missed every sphere");
            state.clear_selection();
        }
    }
}
