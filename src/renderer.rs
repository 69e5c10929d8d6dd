use crate::error::InitError;
use crate::geometry::SphereMesh;
use crate::graphics::{Framebuffer, Program};
use crate::grid::Cell;
use crate::shading::{Material, PhongFragment, PositionNormalVertex};
use crate::state::AppState;
use glam::{Mat4, Vec3};
use std::f32::consts::PI;
use tracing::{debug, info};

/// Peak height of the shared vertical bob
const BOB_AMPLITUDE: f32 = 0.2;

/// Orthographic projection over `[-1, 1]` with near 0.1 and far 10
pub fn projection() -> Mat4 {
    Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0)
}

/// Camera at (0, 0, 3) looking at the origin, +Y up
pub fn view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)
}

/// Model transform of a cell: bob translation, plus a Z spin when selected
pub fn model_transform(cell: Cell, elapsed_time: f32, selected: bool) -> Mat4 {
    let center = cell.center();
    let translation = Mat4::from_translation(Vec3::new(
        center.x,
        center.y,
        BOB_AMPLITUDE * elapsed_time.sin(),
    ));
    if selected {
        translation * Mat4::from_rotation_z(elapsed_time * PI)
    } else {
        translation
    }
}

/// Material bound for a cell
pub fn cell_material(selected: bool) -> Material {
    if selected {
        Material::HIGHLIGHT
    } else {
        Material::DEFAULT
    }
}

/// One draw call of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub cell: Cell,
    pub model: Mat4,
    pub material: Material,
}

/// The 36 draw calls of a frame, in submission order
pub fn frame_draws(state: &AppState) -> impl Iterator<Item = DrawCall> + '_ {
    Cell::all().map(move |cell| {
        let selected = state.is_cell_selected(cell);
        DrawCall {
            cell,
            model: model_transform(cell, state.elapsed_time, selected),
            material: cell_material(selected),
        }
    })
}

/// Owns the sphere mesh, the linked program and the framebuffer
pub struct Renderer {
    mesh: SphereMesh,
    program: Program<PositionNormalVertex, PhongFragment>,
    framebuffer: Framebuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Result<Self, InitError> {
        if width == 0 || height == 0 {
            return Err(InitError::Renderer { width, height });
        }

        let mesh = SphereMesh::grid_sphere();
        let mut program = Program::link(PositionNormalVertex, PhongFragment);
        let uniforms = program.uniforms_mut();
        uniforms.material = Material::DEFAULT;
        uniforms.projection = projection();

        info!(
            width,
            height,
            vertices = mesh.vertex_count(),
            "renderer ready"
        );
        Ok(Renderer {
            mesh,
            program,
            framebuffer: Framebuffer::new(width, height),
        })
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    #[cfg(test)]
    pub(crate) fn program(&self) -> &Program<PositionNormalVertex, PhongFragment> {
        &self.program
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        debug!(width, height, "framebuffer resized");
        self.framebuffer.resize(width, height);
    }

    /// Clears the frame and draws every cell of the grid
    pub fn render_frame(&mut self, state: &AppState) {
        self.framebuffer.clear();

        let uniforms = self.program.uniforms_mut();
        uniforms.view = view();
        uniforms.is_selected = state.is_selected();
        uniforms.selected_index = state.selected_index();

        for draw in frame_draws(state) {
            let uniforms = self.program.uniforms_mut();
            uniforms.material = draw.material;
            uniforms.model = draw.model;
            self.program
                .draw_triangle_fan(&self.mesh, &mut self.framebuffer);
        }

        self.program.uniforms_mut().material = Material::DEFAULT;
    }
}

// Trace point only; the fields free themselves when dropped.
impl Drop for Renderer {
    fn drop(&mut self) {
        debug!("renderer dropped");
    }
}
