use crate::domain::{Light, LightKind, Material, Scene};
use crate::field::{union, MaterialGrid, Primitive, SceneField, VolumeGrid};
use crate::math::Vec3;
use crate::render::texture::TextureAtlas;

pub const SCENE_ID: &str = "blocks_on_plane";

const DIMS: [usize; 3] = [64, 64, 64];
const BLOCK_SIZE: f32 = 16.0;
const GROUND_Y: f32 = 4.0;

const GROUND_MATERIAL: u8 = 0;
const BLOCK_MATERIAL: u8 = 1;

/// Unit blocks resting on the ground plane, a small L-shaped cluster
/// near the middle of the grid.
const BLOCK_CENTERS: [Vec3; 4] = [
    Vec3::new(6.5, 4.5, 8.5),
    Vec3::new(7.5, 4.5, 8.5),
    Vec3::new(9.5, 4.5, 8.5),
    Vec3::new(7.5, 5.5, 8.5),
];

pub fn build() -> Scene {
    let grid = VolumeGrid::from_field(DIMS, BLOCK_SIZE, terrain_distance);
    let materials = MaterialGrid::from_field(DIMS, BLOCK_SIZE, terrain_material);

    Scene {
        id: SCENE_ID,
        field: SceneField {
            grid,
            primitives: Vec::new(),
            materials: Some(materials),
        },
        palette: vec![
            Material::textured("ground_slab", Vec3::new(0.86, 0.85, 0.80), 0),
            Material::textured("block_brick", Vec3::new(0.78, 0.52, 0.40), 1),
        ],
        lights: vec![Light {
            name: "sun_key",
            kind: LightKind::Directional {
                direction: Vec3::new(0.55, -1.0, 0.35).normalize(),
                color: Vec3::new(1.0, 0.96, 0.9),
                intensity: 1.0,
            },
        }],
        ambient: Vec3::new(0.16, 0.18, 0.22),
        atlas: Some(TextureAtlas::checker(2, 32)),
    }
}

fn terrain_distance(p: Vec3) -> f32 {
    let mut d = p.y - GROUND_Y;
    for center in BLOCK_CENTERS {
        let block = Primitive::Box {
            center,
            half_extents: Vec3::splat(0.5),
        };
        d = union(d, block.distance(p));
    }
    d
}

fn terrain_material(p: Vec3) -> u8 {
    let ground = p.y - GROUND_Y;
    let blocks = BLOCK_CENTERS
        .iter()
        .map(|&center| {
            Primitive::Box {
                center,
                half_extents: Vec3::splat(0.5),
            }
            .distance(p)
        })
        .fold(f32::INFINITY, f32::min);
    if blocks < ground {
        BLOCK_MATERIAL
    } else {
        GROUND_MATERIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSource;

    #[test]
    fn baked_grid_matches_analytic_signs() {
        let scene = build();
        // Below ground.
        assert!(scene.field.sample(Vec3::new(3.0, 2.0, 3.0)) < 0.0);
        // Open air above the cluster.
        assert!(scene.field.sample(Vec3::new(8.0, 9.0, 8.5)) > 0.0);
        // Inside one of the blocks.
        assert!(scene.field.sample(Vec3::new(7.5, 4.5, 8.5)) < 0.0);
    }

    #[test]
    fn material_grid_separates_blocks_from_ground() {
        let scene = build();
        let up = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(
            scene.field.material_at(Vec3::new(3.0, 4.0, 3.0), up),
            GROUND_MATERIAL
        );
        assert_eq!(
            scene.field.material_at(Vec3::new(7.5, 5.0, 8.5), up),
            BLOCK_MATERIAL
        );
    }
}
