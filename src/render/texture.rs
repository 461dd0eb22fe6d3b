use crate::math::{fract, Vec3};

/// Horizontal strip of square tiles addressed by material index.
/// Sampling insets each tile's u-range by a margin so bilinear
/// filtering never bleeds into the neighbouring tile.
pub struct TextureAtlas {
    pixels: Vec<Vec3>,
    width: usize,
    height: usize,
    tiles: u32,
}

impl TextureAtlas {
    pub fn new(pixels: Vec<Vec3>, width: usize, height: usize, tiles: u32) -> Self {
        assert_eq!(pixels.len(), width * height);
        assert!(tiles >= 1);
        Self {
            pixels,
            width,
            height,
            tiles,
        }
    }

    pub fn from_image(image: &image::RgbImage, tiles: u32) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| {
                Vec3::new(
                    p.0[0] as f32 / 255.0,
                    p.0[1] as f32 / 255.0,
                    p.0[2] as f32 / 255.0,
                )
            })
            .collect();
        Self::new(pixels, width as usize, height as usize, tiles)
    }

    /// Procedural two-tone checker strip, used by presets that ship no
    /// atlas image.
    pub fn checker(tiles: u32, tile_px: usize) -> Self {
        let width = tiles as usize * tile_px;
        let height = tile_px;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let tile = (x / tile_px) as u32;
                let base = tile_base_color(tile);
                let cell = ((x / 4) + (y / 4)) % 2;
                let shade = if cell == 0 { 1.0 } else { 0.78 };
                pixels.push(base * shade);
            }
        }
        Self::new(pixels, width, height, tiles)
    }

    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    /// Bilinear sample of one tile. `u`/`v` wrap; `u` is remapped into
    /// the tile's sub-range and clamped one texel inside its borders.
    pub fn sample(&self, u: f32, v: f32, tile: u32) -> Vec3 {
        let tile = tile.min(self.tiles - 1);
        let tile_width = 1.0 / self.tiles as f32;
        // Tiles narrower than two texels cannot afford a full-texel
        // inset; cap the margin so the clamp range never inverts.
        let margin = (1.0 / self.width as f32).min(tile_width * 0.5);

        let lo = (tile as f32 * tile_width) + margin;
        let hi = ((tile + 1) as f32 * tile_width) - margin;
        let u_atlas = ((tile as f32 + fract(u)) * tile_width).clamp(lo, hi);
        let v_atlas = fract(v);

        let cx = (u_atlas * self.width as f32) - 0.5;
        let cy = (v_atlas * self.height as f32) - 0.5;
        let (x0, y0) = (cx.floor(), cy.floor());
        let (tx, ty) = (cx - x0, cy - y0);
        let (x0, y0) = (x0 as isize, y0 as isize);

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);
        let c0 = c00.lerp(c10, tx);
        let c1 = c01.lerp(c11, tx);
        c0.lerp(c1, ty)
    }

    fn texel(&self, x: isize, y: isize) -> Vec3 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.pixels[y * self.width + x]
    }
}

fn tile_base_color(tile: u32) -> Vec3 {
    match tile % 4 {
        0 => Vec3::new(0.82, 0.79, 0.72),
        1 => Vec3::new(0.62, 0.42, 0.32),
        2 => Vec3::new(0.45, 0.58, 0.42),
        _ => Vec3::new(0.52, 0.55, 0.62),
    }
}

/// Triplanar projection: blend the YZ, XZ (one axis flipped) and XY
/// projections of the atlas tile by repeatedly squared normal weights,
/// which sharpens the blend toward the dominant axis.
pub fn triplanar(atlas: &TextureAtlas, pos: Vec3, normal: Vec3, tile: u32, scale: f32) -> Vec3 {
    let mut w = normal * normal;
    w = w * w;
    w = w * w;
    let total = (w.x + w.y + w.z).max(1e-6);

    let cx = atlas.sample(pos.y * scale, pos.z * scale, tile);
    let cy = atlas.sample(pos.x * scale, -pos.z * scale, tile);
    let cz = atlas.sample(pos.x * scale, pos.y * scale, tile);

    ((cx * w.x) + (cy * w.y) + (cz * w.z)) / total
}
