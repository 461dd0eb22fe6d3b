use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            (self.y * rhs.z) - (self.z * rhs.y),
            (self.z * rhs.x) - (self.x * rhs.z),
            (self.x * rhs.y) - (self.y * rhs.x),
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        self / len
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }

    pub fn max_component(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    pub fn clamp01(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        self + ((rhs - self) * t)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Unit quaternion used for camera orientation.
#[derive(Clone, Copy, Debug)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn length(self) -> f32 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z) + (self.w * self.w)).sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::IDENTITY;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    fn vector_part(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Rotates `v` by the unit quaternion `q` without building a matrix:
/// `2 * cross(q.xyz, cross(q.xyz, v) + v * q.w) + v`.
pub fn rotate(q: Quat, v: Vec3) -> Vec3 {
    let u = q.vector_part();
    (u.cross(u.cross(v) + (v * q.w)) * 2.0) + v
}

#[derive(Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(self, t: f32) -> Vec3 {
        self.origin + (self.direction * t)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + ((b - a) * t)
}

pub fn fract(v: f32) -> f32 {
    v - v.floor()
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - (2.0 * t))
}

fn scramble(x: f32, p: f32) -> f32 {
    fract(x * p.sqrt())
}

/// Stateless hash from a sample index to `[0, 1)`.
///
/// Nested fract chains over irrational multipliers; nearby indices
/// decorrelate quickly and the result depends on nothing but `index`,
/// which keeps ambient-occlusion sampling reproducible.
pub fn hash01(index: u32) -> f32 {
    let x = index as f32 + 1.0;
    let a = scramble(x, 2.0);
    let b = scramble((x + a) * 7.0, 5.0);
    fract((a + b) * 43.758_547 * 3.0_f32.sqrt())
}

/// Two independent scalar hashes combined into one 2D sample.
pub fn hash2(index: u32) -> (f32, f32) {
    (
        hash01(index.wrapping_mul(2)),
        hash01(index.wrapping_mul(2).wrapping_add(1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_in_unit_range() {
        for index in 0..512 {
            let a = hash01(index);
            let b = hash01(index);
            assert_eq!(a, b);
            assert!((0.0..1.0).contains(&a), "hash01({index}) = {a}");
        }
    }

    #[test]
    fn hash_decorrelates_neighbours() {
        // Adjacent indices should not walk in lockstep.
        let mut close_pairs = 0;
        for index in 0..256 {
            if (hash01(index) - hash01(index + 1)).abs() < 0.01 {
                close_pairs += 1;
            }
        }
        assert!(close_pairs < 16, "{close_pairs} near-identical neighbours");
    }

    #[test]
    fn identity_rotation_preserves_vector() {
        let v = Vec3::new(0.3, -1.2, 4.5);
        let r = rotate(Quat::IDENTITY, v);
        assert!((r - v).length() < 1e-6);
    }

    #[test]
    fn quarter_turn_about_y_swings_z_to_x() {
        let half = std::f32::consts::FRAC_PI_4;
        let q = Quat::new(0.0, half.sin(), 0.0, half.cos());
        let r = rotate(q, Vec3::new(0.0, 0.0, 1.0));
        assert!((r - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }
}
