use glam::{Vec2, Vec3};

/// Width of the logical window every window-space position refers to
pub const WINDOW_WIDTH: f64 = 800.0;
/// Height of the logical window every window-space position refers to
pub const WINDOW_HEIGHT: f64 = 800.0;

/// Edge function used in rasterization
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Converts a window position (origin top-left, y down) to normalized coordinates
pub fn window_to_ndc(xpos: f64, ypos: f64) -> Vec2 {
    let x = (xpos / WINDOW_WIDTH * 2.0 - 1.0) as f32;
    let y = (1.0 - ypos / WINDOW_HEIGHT * 2.0) as f32;
    Vec2::new(x, y)
}

/// Window position of the center of a terminal cell
pub fn terminal_cell_to_window(column: u16, row: u16, cols: u16, rows: u16) -> (f64, f64) {
    let cols = f64::from(cols.max(1));
    let rows = f64::from(rows.max(1));
    (
        (f64::from(column) + 0.5) / cols * WINDOW_WIDTH,
        (f64::from(row) + 0.5) / rows * WINDOW_HEIGHT,
    )
}

/// Reflects the incident vector about the normal
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_center_maps_to_origin() {
        assert_eq!(window_to_ndc(400.0, 400.0), Vec2::ZERO);
    }

    #[test]
    fn window_corners_map_to_ndc_corners() {
        assert_eq!(window_to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(window_to_ndc(800.0, 800.0), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn terminal_cells_map_to_their_centers() {
        assert_eq!(terminal_cell_to_window(0, 0, 80, 40), (5.0, 10.0));
        assert_eq!(terminal_cell_to_window(79, 39, 80, 40), (795.0, 790.0));
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn edge_function_sign_tracks_side() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert!(edge_function(a, b, Vec2::new(0.5, 1.0)) < 0.0);
        assert!(edge_function(a, b, Vec2::new(0.5, -1.0)) > 0.0);
        assert_eq!(edge_function(a, b, Vec2::new(2.0, 0.0)), 0.0);
    }
}
