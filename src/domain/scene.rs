use crate::field::SceneField;
use crate::math::Vec3;
use crate::render::texture::TextureAtlas;

use super::{Light, Material};

/// Read-only resources for one render: the scalar field (grid plus any
/// analytic primitives), the material palette the id grid indexes
/// into, lights, and the ambient term that doubles as the miss color.
pub struct Scene {
    pub id: &'static str,
    pub field: SceneField,
    pub palette: Vec<Material>,
    pub lights: Vec<Light>,
    pub ambient: Vec3,
    pub atlas: Option<TextureAtlas>,
}
