use glam::Vec3;
use std::f32::consts::PI;

/// Stack subdivisions of the grid sphere
pub const STACKS: u32 = 20;
/// Sector subdivisions of the grid sphere
pub const SECTORS: u32 = 20;
/// Radius of every sphere in the grid
pub const RADIUS: f32 = 0.1;

/// Point stream of a UV-sphere, drawn as a triangle fan
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    vertices: Vec<Vec3>,
}

impl SphereMesh {
    /// Generates the sphere stack-major, sector-minor, poles included
    pub fn generate(stacks: u32, sectors: u32, radius: f32) -> Self {
        let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
        for i in 0..=stacks {
            let stack_angle = PI * i as f32 / stacks as f32;
            for j in 0..=sectors {
                let sector_angle = 2.0 * PI * j as f32 / sectors as f32;
                let x = radius * stack_angle.sin() * sector_angle.cos();
                let y = radius * stack_angle.sin() * sector_angle.sin();
                let z = radius * stack_angle.cos();
                vertices.push(Vec3::new(x, y, z));
            }
        }
        SphereMesh { vertices }
    }

    /// The mesh every cell of the grid shares
    pub fn grid_sphere() -> Self {
        Self::generate(STACKS, SECTORS, RADIUS)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Flattened `x, y, z` scalars in vertex order
    pub fn scalars(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }
}
