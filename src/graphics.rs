use crate::geometry::SphereMesh;
use crate::math::edge_function;
use crate::shading::{FragmentStage, Uniforms, VertexStage};
use crate::vertex::{Varyings, Vertex};
use glam::{Vec2, Vec3, Vec4};

/// 8-bit RGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Quantizes a linear color, clamping each channel to `[0, 1]`
    pub fn from_linear(color: Vec4) -> Self {
        let c = color.truncate().clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
        Rgb {
            r: c.x.round() as u8,
            g: c.y.round() as u8,
            b: c.z.round() as u8,
        }
    }
}

/// Color and depth targets, row-major with the origin top-left
pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<Rgb>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            color: vec![Rgb::BLACK; width * height],
            depth: vec![1.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.color = vec![Rgb::BLACK; width * height];
        self.depth = vec![1.0; width * height];
    }

    /// Clears color to black and depth to the far plane
    pub fn clear(&mut self) {
        self.color.fill(Rgb::BLACK);
        self.depth.fill(1.0);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.color[y * self.width + x]
    }

    #[cfg(test)]
    pub(crate) fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[y * self.width + x]
    }

    /// Maps a clip-space position onto the framebuffer
    fn to_screen(&self, clip: Vec4) -> (Vec2, f32) {
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        (Vec2::new(x, y), (ndc.z + 1.0) * 0.5)
    }
}

/// A vertex stage and a fragment stage linked together with their uniforms
pub struct Program<V, F> {
    vertex_stage: V,
    fragment_stage: F,
    uniforms: Uniforms,
}

impl<V: VertexStage, F: FragmentStage> Program<V, F> {
    pub fn link(vertex_stage: V, fragment_stage: F) -> Self {
        Program {
            vertex_stage,
            fragment_stage,
            uniforms: Uniforms::default(),
        }
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut Uniforms {
        &mut self.uniforms
    }

    /// Runs the vertex stage over the mesh and rasterizes it as a triangle fan
    pub fn draw_triangle_fan(&self, mesh: &SphereMesh, target: &mut Framebuffer) {
        let vertices: Vec<Vertex> = mesh
            .vertices()
            .iter()
            .map(|&position| {
                let (clip_position, varyings) =
                    self.vertex_stage.shade_vertex(&self.uniforms, position);
                let (screen_position, depth) = target.to_screen(clip_position);
                Vertex {
                    screen_position,
                    depth,
                    varyings,
                }
            })
            .collect();

        if vertices.len() < 3 {
            return;
        }
        let hub = &vertices[0];
        for pair in vertices[1..].windows(2) {
            self.draw_triangle(hub, &pair[0], &pair[1], target);
        }
    }

    /// Draws a triangle with per-pixel shading
    pub fn draw_triangle(&self, v0: &Vertex, v1: &Vertex, v2: &Vertex, target: &mut Framebuffer) {
        if target.width == 0 || target.height == 0 {
            return;
        }

        // Precompute area of the triangle; both windings are filled
        let area = edge_function(v0.screen_position, v1.screen_position, v2.screen_position);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        // Compute bounding box of the triangle
        let min = v0.screen_position.min(v1.screen_position).min(v2.screen_position);
        let max = v0.screen_position.max(v1.screen_position).max(v2.screen_position);
        if max.x < 0.0 || max.y < 0.0 {
            return;
        }
        let min_x = min.x.floor().max(0.0) as usize;
        let min_y = min.y.floor().max(0.0) as usize;
        let max_x = (max.x.ceil() as usize).min(target.width - 1);
        let max_y = (max.y.ceil() as usize).min(target.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let w0 = edge_function(v1.screen_position, v2.screen_position, p) / area;
                let w1 = edge_function(v2.screen_position, v0.screen_position, p) / area;
                let w2 = edge_function(v0.screen_position, v1.screen_position, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // Depth test against the near and far planes and the buffer
                let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
                let offset = y * target.width + x;
                if !(0.0..=1.0).contains(&depth) || depth >= target.depth[offset] {
                    continue;
                }
                target.depth[offset] = depth;

                let varyings = Varyings::interpolate(
                    &v0.varyings,
                    &v1.varyings,
                    &v2.varyings,
                    Vec3::new(w0, w1, w2),
                );
                let color = self.fragment_stage.shade_fragment(&self.uniforms, &varyings);
                target.color[offset] = Rgb::from_linear(color);
            }
        }
    }
}
