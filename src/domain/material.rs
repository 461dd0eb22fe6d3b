use crate::math::Vec3;

/// Palette entry addressed by the material-id grid. `atlas_tile` picks
/// a tile for triplanar texturing; `None` renders the flat albedo.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub name: &'static str,
    pub albedo: Vec3,
    pub atlas_tile: Option<u32>,
}

impl Material {
    pub const fn textured(name: &'static str, albedo: Vec3, tile: u32) -> Self {
        Self {
            name,
            albedo,
            atlas_tile: Some(tile),
        }
    }
}
