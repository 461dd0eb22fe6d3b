pub mod grid;
pub mod primitives;

pub use grid::{MaterialGrid, VolumeGrid};
pub use primitives::Primitive;

use crate::math::Vec3;

/// A scalar field over world space. Values are positive outside the
/// surface, negative inside; the zero level set is the surface itself.
///
/// Implementations are not required to return true Euclidean distances,
/// only a step-size heuristic the marcher can trust not to overshoot by
/// much. Out-of-domain queries must return a finite value.
pub trait FieldSource {
    fn sample(&self, p: Vec3) -> f32;
}

impl<F> FieldSource for F
where
    F: Fn(Vec3) -> f32,
{
    fn sample(&self, p: Vec3) -> f32 {
        self(p)
    }
}

/// Union of two implicit surfaces is the pointwise minimum of their fields.
pub fn union(a: f32, b: f32) -> f32 {
    a.min(b)
}

/// Intersection keeps the pointwise maximum.
pub fn intersection(a: f32, b: f32) -> f32 {
    a.max(b)
}

/// The field a scene exposes to the renderer: a baked volumetric grid
/// optionally unioned with a handful of analytic primitives, plus a
/// parallel material-id grid.
pub struct SceneField {
    pub grid: VolumeGrid,
    pub primitives: Vec<Primitive>,
    pub materials: Option<MaterialGrid>,
}

impl SceneField {
    pub fn grid_only(grid: VolumeGrid) -> Self {
        Self {
            grid,
            primitives: Vec::new(),
            materials: None,
        }
    }

    /// World size of one grid texel; the renderer's miss tolerance and
    /// shadow-ray seed are derived from this.
    pub fn resolution_step(&self) -> f32 {
        self.grid.step()
    }

    /// Material id at a hit point. The lookup position is pulled
    /// slightly inward along the normal so that boundary voxels do not
    /// alias between neighbouring materials.
    pub fn material_at(&self, pos: Vec3, normal: Vec3) -> u8 {
        match &self.materials {
            Some(materials) => {
                let biased = pos - (normal * (self.grid.step() * 0.5));
                materials.sample(biased)
            }
            None => 0,
        }
    }
}

impl FieldSource for SceneField {
    fn sample(&self, p: Vec3) -> f32 {
        let mut d = self.grid.sample(p);
        for primitive in &self.primitives {
            d = union(d, primitive.distance(p));
        }
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_pointwise_minimum() {
        let a = Primitive::Sphere {
            center: Vec3::new(0.0, 0.0, 0.0),
            radius: 1.0,
        };
        let b = Primitive::Box {
            center: Vec3::new(2.0, 0.0, 0.0),
            half_extents: Vec3::splat(0.5),
        };
        for i in 0..64 {
            let p = Vec3::new(i as f32 * 0.1 - 2.0, 0.3, -0.2);
            let da = a.distance(p);
            let db = b.distance(p);
            assert_eq!(union(da, db), da.min(db));
            assert_eq!(intersection(da, db), da.max(db));
        }
    }

    #[test]
    fn scene_field_unions_grid_with_primitives() {
        let grid = VolumeGrid::from_field([16, 16, 16], 8.0, |p| p.y - 6.0);
        let field = SceneField {
            grid,
            primitives: vec![Primitive::Sphere {
                center: Vec3::new(4.0, 2.0, 4.0),
                radius: 1.0,
            }],
            materials: None,
        };
        // Inside the analytic sphere but well above nothing else.
        let inside = field.sample(Vec3::new(4.0, 2.0, 4.0));
        assert!(inside < 0.0, "sphere interior sampled {inside}");
        // Far from the sphere the grid plane dominates.
        let above = field.sample(Vec3::new(1.0, 7.5, 1.0));
        assert!(above > 0.0, "open air sampled {above}");
    }
}
