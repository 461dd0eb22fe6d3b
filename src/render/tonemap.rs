use crate::math::Vec3;

/// Fixed compressive map from unbounded linear radiance into `[0,1]`:
/// `√(c / (1 + c))` per component. Parameterless so identical radiance
/// always produces identical output.
pub fn tonemap(color: Vec3) -> Vec3 {
    let c = color.max(Vec3::splat(0.0));
    Vec3::new(
        (c.x / (1.0 + c.x)).sqrt(),
        (c.y / (1.0 + c.y)).sqrt(),
        (c.z / (1.0 + c.z)).sqrt(),
    )
}
