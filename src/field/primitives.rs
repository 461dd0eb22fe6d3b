use crate::math::Vec3;

/// Closed set of analytic shapes a scene may union with its grid.
/// Extending the renderer with a new shape means adding a variant here;
/// the marcher never changes.
#[derive(Clone, Copy, Debug)]
pub enum Primitive {
    Sphere { center: Vec3, radius: f32 },
    Box { center: Vec3, half_extents: Vec3 },
    /// Solid half-space below `y`.
    HalfSpace { y: f32 },
}

impl Primitive {
    pub fn distance(&self, p: Vec3) -> f32 {
        match *self {
            Self::Sphere { center, radius } => (p - center).length() - radius,
            Self::Box {
                center,
                half_extents,
            } => sd_box(p - center, half_extents),
            Self::HalfSpace { y } => p.y - y,
        }
    }
}

fn sd_box(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    let outside = q.max(Vec3::splat(0.0));
    outside.length() + q.max_component().min(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_sign_convention() {
        let s = Primitive::Sphere {
            center: Vec3::splat(1.0),
            radius: 0.5,
        };
        assert!(s.distance(Vec3::splat(1.0)) < 0.0);
        assert!(s.distance(Vec3::new(3.0, 1.0, 1.0)) > 0.0);
        assert!((s.distance(Vec3::new(1.5, 1.0, 1.0))).abs() < 1e-6);
    }

    #[test]
    fn box_distance_is_exact_outside() {
        let b = Primitive::Box {
            center: Vec3::splat(0.0),
            half_extents: Vec3::splat(1.0),
        };
        assert!((b.distance(Vec3::new(3.0, 0.0, 0.0)) - 2.0).abs() < 1e-6);
        assert!(b.distance(Vec3::splat(0.0)) < 0.0);
    }

    #[test]
    fn half_space_splits_on_plane() {
        let h = Primitive::HalfSpace { y: 2.0 };
        assert!(h.distance(Vec3::new(0.0, 1.0, 0.0)) < 0.0);
        assert!(h.distance(Vec3::new(0.0, 3.0, 0.0)) > 0.0);
    }
}
