use glam::{Vec2, Vec3};

/// Values the vertex stage hands to the fragment stage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Varyings {
    /// World-space position
    pub frag_pos: Vec3,
    /// Lighting normal, not normalized
    pub normal: Vec3,
}

impl Varyings {
    /// Barycentric blend of three vertices' varyings
    pub fn interpolate(a: &Varyings, b: &Varyings, c: &Varyings, w: Vec3) -> Varyings {
        Varyings {
            frag_pos: a.frag_pos * w.x + b.frag_pos * w.y + c.frag_pos * w.z,
            normal: a.normal * w.x + b.normal * w.y + c.normal * w.z,
        }
    }
}

/// Vertex after the vertex stage and viewport mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Framebuffer position, origin top-left
    pub screen_position: Vec2,
    /// Window depth in `[0, 1]` for vertices inside the clip volume
    pub depth: f32,
    pub varyings: Varyings,
}
