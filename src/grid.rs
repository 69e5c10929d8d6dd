use glam::Vec2;

/// Cells per grid axis
pub const GRID_SIZE: usize = 6;
/// Total number of cells in the grid
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Distance between neighbouring cell centers
pub const CELL_SPACING: f32 = 0.4;
/// Cell coordinate that sits on the origin
const ORIGIN_CELL: i32 = 2;

/// One position of the 6x6 grid, one rendered sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub i: usize,
    pub j: usize,
}

impl Cell {
    pub fn new(i: usize, j: usize) -> Self {
        debug_assert!(i < GRID_SIZE && j < GRID_SIZE);
        Cell { i, j }
    }

    /// Row-major cell index, `i * 6 + j`
    pub fn index(self) -> usize {
        self.i * GRID_SIZE + self.j
    }

    /// Center of the cell in the XY plane
    pub fn center(self) -> Vec2 {
        Vec2::new(
            (self.i as i32 - ORIGIN_CELL) as f32 * CELL_SPACING,
            (self.j as i32 - ORIGIN_CELL) as f32 * CELL_SPACING,
        )
    }

    /// All cells, `i` outer and `j` inner
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE).flat_map(|i| (0..GRID_SIZE).map(move |j| Cell::new(i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_follow_fixed_spacing() {
        for cell in Cell::all() {
            let expected = Vec2::new(
                (cell.i as f32 - 2.0) * 0.4,
                (cell.j as f32 - 2.0) * 0.4,
            );
            assert!((cell.center() - expected).length() < 1e-6);
        }
    }

    #[test]
    fn centers_increase_monotonically_per_axis() {
        for k in 1..GRID_SIZE {
            let prev = Cell::new(k - 1, k - 1).center();
            let cur = Cell::new(k, k).center();
            assert!((cur.x - prev.x - CELL_SPACING).abs() < 1e-6);
            assert!((cur.y - prev.y - CELL_SPACING).abs() < 1e-6);
        }
    }

    #[test]
    fn iteration_is_row_major_over_36_cells() {
        let cells: Vec<Cell> = Cell::all().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        for (n, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index(), n);
        }
        assert_eq!(cells[1], Cell::new(0, 1));
        assert_eq!(cells[6], Cell::new(1, 0));
    }

    #[test]
    fn origin_cell_is_index_14() {
        let cell = Cell::new(2, 2);
        assert_eq!(cell.index(), 14);
        assert_eq!(cell.center(), Vec2::ZERO);
    }
}
