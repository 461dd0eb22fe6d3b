use crate::math::{lerp, Vec3};

/// Default decode transform. Stored bytes map to
/// `v/255 * VALUE_RANGE - VALUE_OFFSET`, i.e. encoded distances live in
/// `[-1, 10]` world units with roughly unit gradient near the surface.
pub const VALUE_RANGE: f32 = 11.0;
pub const VALUE_OFFSET: f32 = 1.0;

/// A bounded scalar grid addressed in a normalized `[0,1]^3` space that
/// spans `block_size` world units per axis. Samples are trilinearly
/// filtered and the normalized coordinate is clamped one texel away
/// from every face, so out-of-domain queries return the edge value
/// instead of faulting or wrapping.
pub struct VolumeGrid {
    dims: [usize; 3],
    block_size: f32,
    value_range: f32,
    value_offset: f32,
    data: Vec<u8>,
}

impl VolumeGrid {
    pub fn new(dims: [usize; 3], block_size: f32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), dims[0] * dims[1] * dims[2]);
        Self {
            dims,
            block_size,
            value_range: VALUE_RANGE,
            value_offset: VALUE_OFFSET,
            data,
        }
    }

    /// Bakes an analytic field into a byte grid, quantizing with the
    /// same transform `sample` later inverts.
    pub fn from_field(dims: [usize; 3], block_size: f32, f: impl Fn(Vec3) -> f32) -> Self {
        let mut data = vec![0u8; dims[0] * dims[1] * dims[2]];
        let scale = [
            block_size / dims[0] as f32,
            block_size / dims[1] as f32,
            block_size / dims[2] as f32,
        ];
        for z in 0..dims[2] {
            for y in 0..dims[1] {
                for x in 0..dims[0] {
                    let p = Vec3::new(
                        (x as f32 + 0.5) * scale[0],
                        (y as f32 + 0.5) * scale[1],
                        (z as f32 + 0.5) * scale[2],
                    );
                    let encoded = (f(p) + VALUE_OFFSET) / VALUE_RANGE * 255.0;
                    data[(z * dims[1] + y) * dims[0] + x] =
                        encoded.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
        Self::new(dims, block_size, data)
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// World size of the finest texel.
    pub fn step(&self) -> f32 {
        let max_dim = self.dims.iter().copied().max().unwrap_or(1);
        self.block_size / max_dim as f32
    }

    /// Trilinear field sample at a world point.
    pub fn sample(&self, p: Vec3) -> f32 {
        let uv = self.clamped_normalized(p);

        // Continuous texel coordinates, cell-centered.
        let cx = uv.x * self.dims[0] as f32 - 0.5;
        let cy = uv.y * self.dims[1] as f32 - 0.5;
        let cz = uv.z * self.dims[2] as f32 - 0.5;
        let (x0, y0, z0) = (cx.floor(), cy.floor(), cz.floor());
        let (tx, ty, tz) = (cx - x0, cy - y0, cz - z0);
        let (x0, y0, z0) = (x0 as isize, y0 as isize, z0 as isize);

        let c000 = self.fetch(x0, y0, z0);
        let c100 = self.fetch(x0 + 1, y0, z0);
        let c010 = self.fetch(x0, y0 + 1, z0);
        let c110 = self.fetch(x0 + 1, y0 + 1, z0);
        let c001 = self.fetch(x0, y0, z0 + 1);
        let c101 = self.fetch(x0 + 1, y0, z0 + 1);
        let c011 = self.fetch(x0, y0 + 1, z0 + 1);
        let c111 = self.fetch(x0 + 1, y0 + 1, z0 + 1);

        let c00 = lerp(c000, c100, tx);
        let c10 = lerp(c010, c110, tx);
        let c01 = lerp(c001, c101, tx);
        let c11 = lerp(c011, c111, tx);
        let c0 = lerp(c00, c10, ty);
        let c1 = lerp(c01, c11, ty);
        let raw = lerp(c0, c1, tz);

        raw * self.value_range - self.value_offset
    }

    fn clamped_normalized(&self, p: Vec3) -> Vec3 {
        let uv = p / self.block_size;
        Vec3::new(
            clamp_margin(uv.x, self.dims[0]),
            clamp_margin(uv.y, self.dims[1]),
            clamp_margin(uv.z, self.dims[2]),
        )
    }

    fn fetch(&self, x: isize, y: isize, z: isize) -> f32 {
        let x = x.clamp(0, self.dims[0] as isize - 1) as usize;
        let y = y.clamp(0, self.dims[1] as isize - 1) as usize;
        let z = z.clamp(0, self.dims[2] as isize - 1) as usize;
        self.data[(z * self.dims[1] + y) * self.dims[0] + x] as f32 / 255.0
    }
}

fn clamp_margin(v: f32, dim: usize) -> f32 {
    // A single-texel axis would invert the clamp range; cap the margin
    // so such axes collapse to their center instead.
    let margin = (1.0 / dim as f32).min(0.5);
    v.clamp(margin, 1.0 - margin)
}

/// Parallel grid of material ids, sampled nearest-neighbour with the
/// same clamped normalized addressing as the field grid.
pub struct MaterialGrid {
    dims: [usize; 3],
    block_size: f32,
    data: Vec<u8>,
}

impl MaterialGrid {
    pub fn from_field(dims: [usize; 3], block_size: f32, f: impl Fn(Vec3) -> u8) -> Self {
        let mut data = vec![0u8; dims[0] * dims[1] * dims[2]];
        let scale = [
            block_size / dims[0] as f32,
            block_size / dims[1] as f32,
            block_size / dims[2] as f32,
        ];
        for z in 0..dims[2] {
            for y in 0..dims[1] {
                for x in 0..dims[0] {
                    let p = Vec3::new(
                        (x as f32 + 0.5) * scale[0],
                        (y as f32 + 0.5) * scale[1],
                        (z as f32 + 0.5) * scale[2],
                    );
                    data[(z * dims[1] + y) * dims[0] + x] = f(p);
                }
            }
        }
        Self {
            dims,
            block_size,
            data,
        }
    }

    pub fn sample(&self, p: Vec3) -> u8 {
        let uv = p / self.block_size;
        let x = (clamp_margin(uv.x, self.dims[0]) * self.dims[0] as f32) as usize;
        let y = (clamp_margin(uv.y, self.dims[1]) * self.dims[1] as f32) as usize;
        let z = (clamp_margin(uv.z, self.dims[2]) * self.dims[2] as f32) as usize;
        let x = x.min(self.dims[0] - 1);
        let y = y.min(self.dims[1] - 1);
        let z = z.min(self.dims[2] - 1);
        self.data[(z * self.dims[1] + y) * self.dims[0] + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_grid() -> VolumeGrid {
        // Sphere of radius 2 centered in an 8-unit block.
        VolumeGrid::from_field([64, 64, 64], 8.0, |p| {
            (p - Vec3::splat(4.0)).length() - 2.0
        })
    }

    #[test]
    fn sign_matches_analytic_solid() {
        let grid = sphere_grid();
        // Strictly inside.
        assert!(grid.sample(Vec3::splat(4.0)) < 0.0);
        assert!(grid.sample(Vec3::new(4.0, 5.0, 4.0)) < 0.0);
        // Strictly outside, with quantization slack.
        assert!(grid.sample(Vec3::new(4.0, 7.0, 4.0)) > 0.1);
        assert!(grid.sample(Vec3::new(1.0, 1.0, 1.0)) > 0.1);
    }

    #[test]
    fn out_of_domain_queries_stay_finite() {
        let grid = sphere_grid();
        let far = [
            Vec3::new(-100.0, 4.0, 4.0),
            Vec3::new(4.0, 1e6, 4.0),
            Vec3::new(1e8, -1e8, 1e8),
        ];
        for p in far {
            let d = grid.sample(p);
            assert!(d.is_finite(), "sample({p:?}) = {d}");
            // Edge-clamped value, never the interior.
            assert!(d > 0.0);
        }
    }

    #[test]
    fn single_texel_axis_samples_without_faulting() {
        // One axis collapses to a single texel; sampling must still
        // return the decoded edge value.
        let grid = VolumeGrid::new([1, 4, 4], 4.0, vec![128; 16]);
        let d = grid.sample(Vec3::new(2.0, 2.0, 2.0));
        assert!(d.is_finite());
        let expected = (128.0 / 255.0) * VALUE_RANGE - VALUE_OFFSET;
        assert!((d - expected).abs() < 1e-4, "sampled {d}, expected {expected}");
    }

    #[test]
    fn decode_roundtrips_within_quantization_error() {
        let grid = sphere_grid();
        // One byte covers VALUE_RANGE/255 world units; trilinear blur
        // near a smooth sphere stays within a few quanta.
        let p = Vec3::new(4.0, 6.5, 4.0);
        let analytic = (p - Vec3::splat(4.0)).length() - 2.0;
        assert!((grid.sample(p) - analytic).abs() < 0.2);
    }

    #[test]
    fn material_grid_is_nearest_neighbour() {
        let materials = MaterialGrid::from_field([16, 16, 16], 8.0, |p| {
            if p.y < 4.0 {
                1
            } else {
                2
            }
        });
        assert_eq!(materials.sample(Vec3::new(4.0, 1.0, 4.0)), 1);
        assert_eq!(materials.sample(Vec3::new(4.0, 7.0, 4.0)), 2);
    }
}
