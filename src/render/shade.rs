use crate::field::FieldSource;
use crate::math::{hash2, lerp, Vec3};
use crate::render::settings::RenderTuning;

/// Central-difference gradient at a refined hit point. The offset
/// interpolates between a tiny constant and half a grid texel under the
/// smoothness parameter; 0 keeps normals sharp. May return a non-finite
/// vector on a degenerate gradient; callers substitute a fallback.
pub fn estimate_normal(
    field: &impl FieldSource,
    p: Vec3,
    grid_step: f32,
    smoothness: f32,
) -> Vec3 {
    let k = lerp(1e-3, grid_step * 0.5, smoothness);
    let dx = field.sample(p + Vec3::new(k, 0.0, 0.0)) - field.sample(p - Vec3::new(k, 0.0, 0.0));
    let dy = field.sample(p + Vec3::new(0.0, k, 0.0)) - field.sample(p - Vec3::new(0.0, k, 0.0));
    let dz = field.sample(p + Vec3::new(0.0, 0.0, k)) - field.sample(p - Vec3::new(0.0, 0.0, k));
    Vec3::new(dx, dy, dz).normalize()
}

/// Penumbra-tracking soft shadow along one light direction.
///
/// Tracks the minimum ratio of the implied perpendicular clearance to
/// the distance along the ray (the "improved soft shadows" sphere
/// tracing identity): `y = h²/(2·ph)`, `d = √(h²−y²)`,
/// `s = min(s, sharpness·d / max(0, t−y))`. Returns the shadow factor
/// in `[0,1]` (0 fully occluded) plus the iterations spent.
pub fn soft_shadow(
    field: &impl FieldSource,
    origin: Vec3,
    dir: Vec3,
    seed: f32,
    tuning: &RenderTuning,
) -> (f32, u32) {
    let mut s = 1.0f32;
    let mut t = seed;
    let mut ph = tuning.hit_epsilon;
    let mut steps = 0u32;

    while steps < tuning.shadow_max_steps {
        if t > tuning.max_distance {
            break;
        }
        steps += 1;
        let h = field.sample(origin + (dir * t));
        if h < tuning.hit_epsilon {
            return (0.0, steps);
        }
        let y = (h * h) / (2.0 * ph);
        let d = ((h * h) - (y * y)).max(0.0).sqrt();
        s = s.min(tuning.shadow_sharpness * d / (t - y).max(0.0));
        ph = h;
        t += h;
    }

    (s.clamp(0.0, 1.0), steps)
}

/// Stochastic hemisphere ambient occlusion, two fixed radii.
///
/// Sample directions are deterministic functions of the sample index,
/// pulled toward the normal with weight `1 − 1/M`. Each sample
/// accumulates `radius − max(F(p + dir·r), 0)`, i.e. how much of the
/// probe sphere is blocked. The near and far channels are normalized,
/// clamped and blended as `near · √far`; 1 is fully open.
pub fn ambient_occlusion(
    field: &impl FieldSource,
    pos: Vec3,
    normal: Vec3,
    tuning: &RenderTuning,
) -> (f32, u32) {
    let m = tuning.ao_samples.max(1);
    let bias = 1.0 - (1.0 / m as f32);
    let near_r = tuning.ao_near_radius;
    let far_r = tuning.ao_far_radius;

    let mut near_occluded = 0.0f32;
    let mut far_occluded = 0.0f32;
    for i in 0..m {
        let (u1, v1) = hash2(i * 2);
        let (u2, v2) = hash2(i * 2 + 1);
        let near_dir = hemisphere_dir(normal, u1, v1, bias);
        let far_dir = hemisphere_dir(normal, u2, v2, bias);
        near_occluded += near_r - field.sample(pos + (near_dir * near_r)).max(0.0);
        far_occluded += far_r - field.sample(pos + (far_dir * far_r)).max(0.0);
    }

    let near_open = (1.0 - (near_occluded / (m as f32 * near_r))).clamp(0.0, 1.0);
    let far_open = (1.0 - (far_occluded / (m as f32 * far_r))).clamp(0.0, 1.0);
    ((near_open * far_open.sqrt()).clamp(0.0, 1.0), m)
}

/// Unit direction in the hemisphere around `normal`, pulled toward it
/// by `bias`.
fn hemisphere_dir(normal: Vec3, u: f32, v: f32, bias: f32) -> Vec3 {
    let z = (u * 2.0) - 1.0;
    let phi = v * std::f32::consts::TAU;
    let r = (1.0 - (z * z)).max(0.0).sqrt();
    let mut dir = Vec3::new(r * phi.cos(), r * phi.sin(), z);
    if dir.dot(normal) < 0.0 {
        dir = -dir;
    }
    dir.lerp(normal, bias).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::settings::RenderTuning;

    fn plane(p: Vec3) -> f32 {
        p.y
    }

    #[test]
    fn normal_of_plane_points_up() {
        let n = estimate_normal(&plane, Vec3::new(3.0, 0.0, -2.0), 0.25, 0.0);
        assert!((n - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn normal_of_sphere_points_outward() {
        let sphere = |p: Vec3| (p - Vec3::splat(5.0)).length() - 2.0;
        let surface = Vec3::new(7.0, 5.0, 5.0);
        let n = estimate_normal(&sphere, surface, 0.25, 0.0);
        assert!((n - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn degenerate_gradient_yields_non_finite_normal() {
        let flat = |_p: Vec3| 0.5f32;
        let n = estimate_normal(&flat, Vec3::splat(0.0), 0.25, 0.0);
        // Zero gradient: normalize keeps the zero vector, which callers
        // must replace. Either way it is not a usable unit normal.
        assert!(n.length() < 0.5);
    }

    #[test]
    fn unoccluded_plane_is_fully_lit() {
        let tuning = RenderTuning::default();
        let (s, _) = soft_shadow(
            &plane,
            Vec3::new(0.0, 0.01, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            0.06,
            &tuning,
        );
        assert!(s > 0.95, "open sky shadow factor {s}");
    }

    #[test]
    fn ray_into_solid_is_fully_shadowed() {
        let tuning = RenderTuning::default();
        let (s, _) = soft_shadow(
            &plane,
            Vec3::new(0.0, 0.01, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            0.06,
            &tuning,
        );
        assert_eq!(s, 0.0);
    }

    #[test]
    fn shadow_factor_stays_in_unit_range() {
        let tuning = RenderTuning::default();
        let bumps = |p: Vec3| (p.y - (p.x.sin() * 0.4)).abs() * 0.5 + 0.02;
        for i in 0..32 {
            let dir = Vec3::new((i as f32 * 0.37).sin(), 1.0, (i as f32 * 0.73).cos()).normalize();
            let (s, _) = soft_shadow(&bumps, Vec3::new(i as f32, 0.5, 0.0), dir, 0.06, &tuning);
            assert!((0.0..=1.0).contains(&s), "shadow {s} out of range");
        }
    }

    #[test]
    fn ao_open_plane_is_nearly_one() {
        let tuning = RenderTuning::default();
        let (ao, steps) = ambient_occlusion(&plane, Vec3::splat(0.0), Vec3::new(0.0, 1.0, 0.0), &tuning);
        assert!(ao > 0.85, "open plane AO {ao}");
        assert_eq!(steps, tuning.ao_samples);
    }

    #[test]
    fn ao_in_tight_cavity_is_nearly_zero() {
        let tuning = RenderTuning::default();
        // Field pinned at zero: every probe is fully blocked.
        let cavity = |_p: Vec3| 0.0f32;
        let (ao, _) = ambient_occlusion(&cavity, Vec3::splat(0.0), Vec3::new(0.0, 1.0, 0.0), &tuning);
        assert!(ao < 0.05, "cavity AO {ao}");
    }

    #[test]
    fn ao_is_deterministic() {
        let tuning = RenderTuning::default();
        let sphere = |p: Vec3| p.length() - 1.0;
        let pos = Vec3::new(0.0, 1.0, 0.0);
        let n = Vec3::new(0.0, 1.0, 0.0);
        let (a, _) = ambient_occlusion(&sphere, pos, n, &tuning);
        let (b, _) = ambient_occlusion(&sphere, pos, n, &tuning);
        assert_eq!(a, b);
    }
}
