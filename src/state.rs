use crate::grid::{Cell, CELL_COUNT};

/// Fixed animation step added every frame, independent of wall-clock time
pub const FRAME_STEP: f32 = 0.016;

/// Application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Index of the picked cell, if any
    selected: Option<usize>,
    /// Animation clock
    pub elapsed_time: f32,
    /// Set by Escape or a close signal, checked at the top of every frame
    close_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the animation clock by one frame
    pub fn tick(&mut self) {
        self.elapsed_time += FRAME_STEP;
    }

    pub fn select(&mut self, index: usize) {
        debug_assert!(index < CELL_COUNT);
        self.selected = Some(index);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    /// Selected index, or -1 when nothing is picked
    pub fn selected_index(&self) -> i32 {
        self.selected.map_or(-1, |index| index as i32)
    }

    pub fn is_cell_selected(&self, cell: Cell) -> bool {
        self.selected == Some(cell.index())
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }
}
