//! Vertex and fragment stages of the Phong pipeline and the uniforms they read.

use crate::math::reflect;
use crate::vertex::Varyings;
use glam::{Mat3, Mat4, Vec3, Vec4};

/// Constant tint added to every lit fragment
pub const BACKGROUND_TINT: Vec3 = Vec3::splat(0.2);
/// Multiplier applied to fragments that pass the highlight test
pub const HIGHLIGHT_GAIN: f32 = 2.5;
/// Quantization factor of the highlight test
const HIGHLIGHT_BUCKETS: f32 = 6.0;

/// Surface response to the light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    pub const DEFAULT: Material = Material {
        ambient: Vec3::splat(0.2),
        diffuse: Vec3::splat(0.8),
        specular: Vec3::splat(1.0),
        shininess: 32.0,
    };

    /// Brighter triple bound for the selected sphere; shininess is left as is
    pub const HIGHLIGHT: Material = Material {
        ambient: Vec3::splat(0.4),
        diffuse: Vec3::splat(1.0),
        specular: Vec3::splat(1.0),
        shininess: 32.0,
    };
}

impl Default for Material {
    fn default() -> Self {
        Material::DEFAULT
    }
}

/// Point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    /// The single light of the scene
    pub const SCENE: Light = Light {
        position: Vec3::new(1.0, 1.0, 2.0),
        ambient: Vec3::splat(0.2),
        diffuse: Vec3::splat(0.5),
        specular: Vec3::splat(1.0),
    };
}

impl Default for Light {
    fn default() -> Self {
        Light::SCENE
    }
}

/// Uniform block shared by both stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub material: Material,
    pub light: Light,
    pub is_selected: bool,
    pub selected_index: i32,
}

impl Default for Uniforms {
    fn default() -> Self {
        Uniforms {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            material: Material::DEFAULT,
            light: Light::SCENE,
            is_selected: false,
            selected_index: -1,
        }
    }
}

/// Per-vertex stage: object-space position in, clip position and varyings out
pub trait VertexStage {
    fn shade_vertex(&self, uniforms: &Uniforms, position: Vec3) -> (Vec4, Varyings);
}

/// Per-fragment stage: interpolated varyings in, RGBA out
pub trait FragmentStage {
    fn shade_fragment(&self, uniforms: &Uniforms, varyings: &Varyings) -> Vec4;
}

/// Transforms positions and derives the lighting normal from the position itself
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionNormalVertex;

impl VertexStage for PositionNormalVertex {
    fn shade_vertex(&self, uniforms: &Uniforms, position: Vec3) -> (Vec4, Varyings) {
        let local = position.extend(1.0);
        let world = uniforms.model * local;
        let normal_matrix = Mat3::from_mat4(uniforms.model.inverse().transpose());
        let varyings = Varyings {
            frag_pos: world.truncate(),
            normal: normal_matrix * position,
        };
        let clip = uniforms.projection * uniforms.view * world;
        (clip, varyings)
    }
}

/// Phong lighting with the quantized selection highlight
#[derive(Debug, Clone, Copy, Default)]
pub struct PhongFragment;

impl PhongFragment {
    /// Lit color before the highlight gain and the background tint
    pub fn phong(material: &Material, light: &Light, varyings: &Varyings) -> Vec3 {
        let ambient = light.ambient * material.ambient;

        let norm = varyings.normal.normalize_or_zero();
        let light_dir = (light.position - varyings.frag_pos).normalize_or_zero();
        let diff = norm.dot(light_dir).max(0.0);
        let diffuse = light.diffuse * diff * material.diffuse;

        let view_dir = (-varyings.frag_pos).normalize_or_zero();
        let reflect_dir = reflect(-light_dir, norm);
        let spec = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
        let specular = light.specular * spec * material.specular;

        ambient + diffuse + specular
    }

    /// Whether the fragment falls in the bucket of the selected index
    pub fn in_highlight_bucket(uniforms: &Uniforms, frag_pos: Vec3) -> bool {
        uniforms.is_selected
            && (frag_pos.x * HIGHLIGHT_BUCKETS) as i32 == uniforms.selected_index % 6
            && (frag_pos.y * HIGHLIGHT_BUCKETS) as i32 == uniforms.selected_index / 6
    }
}

impl FragmentStage for PhongFragment {
    fn shade_fragment(&self, uniforms: &Uniforms, varyings: &Varyings) -> Vec4 {
        let mut result = Self::phong(&uniforms.material, &uniforms.light, varyings);
        if Self::in_highlight_bucket(uniforms, varyings.frag_pos) {
            result *= HIGHLIGHT_GAIN;
        }
        (result + BACKGROUND_TINT).extend(1.0)
    }
}
