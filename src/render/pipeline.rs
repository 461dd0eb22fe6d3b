use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::domain::Scene;
use crate::field::SceneField;
use crate::math::{smoothstep, Ray, Vec3};
use crate::render::march::{coarse_march, crossed_surface, refine};
use crate::render::settings::{DebugView, RenderSettings, RenderTuning};
use crate::render::shade::{ambient_occlusion, estimate_normal, soft_shadow};
use crate::render::texture::{triplanar, TextureAtlas};
use crate::render::tonemap::tonemap;
use crate::render::view::View;

use crate::domain::{Light, Material};

/// Read-only bindings one pixel invocation consumes. Borrowed from the
/// scene so the per-pixel code never touches global state.
pub struct RenderInputs<'a> {
    pub field: &'a SceneField,
    pub palette: &'a [Material],
    pub lights: &'a [Light],
    pub ambient: Vec3,
    pub atlas: Option<&'a TextureAtlas>,
}

impl<'a> RenderInputs<'a> {
    pub fn from_scene(scene: &'a Scene) -> Self {
        Self {
            field: &scene.field,
            palette: &scene.palette,
            lights: &scene.lights,
            ambient: scene.ambient,
            atlas: scene.atlas.as_ref(),
        }
    }
}

/// One pixel's result: the tonemapped color, whether any geometry was
/// hit (the miss sentinel for downstream compositing), and the total
/// iterations spent across march, refine, shadow and AO loops.
#[derive(Clone, Copy, Debug)]
pub struct PixelSample {
    pub color: Vec3,
    pub hit: bool,
    pub iterations: u32,
}

/// Full pipeline for a single ray:
/// march, classify, refine, shade, tonemap. Misses short-circuit to
/// the ambient background. Stateless; safe to call from any thread.
pub fn shade_pixel(inputs: &RenderInputs<'_>, ray: Ray, tuning: &RenderTuning) -> PixelSample {
    let grid_step = inputs.field.resolution_step();

    let outcome = coarse_march(inputs.field, ray, tuning);
    let mut iterations = outcome.steps;
    if !crossed_surface(&outcome, grid_step) {
        return PixelSample {
            color: inputs.ambient,
            hit: false,
            iterations,
        };
    }

    let hit = refine(inputs.field, ray, &outcome, tuning);
    iterations += hit.steps;

    let mut normal = estimate_normal(inputs.field, hit.position, grid_step, tuning.normal_smoothness);
    if !normal.is_finite() || normal.length() < 0.5 {
        normal = -ray.direction;
    }

    let material_id = inputs.field.material_at(hit.position, normal);
    let material = inputs
        .palette
        .get(material_id as usize)
        .or_else(|| inputs.palette.first());
    let albedo = match material {
        Some(material) => match (inputs.atlas, material.atlas_tile) {
            (Some(atlas), Some(tile)) => {
                triplanar(atlas, hit.position, normal, tile, tuning.texture_scale)
            }
            _ => material.albedo,
        },
        None => Vec3::splat(0.5),
    };

    let (ao, ao_steps) = ambient_occlusion(inputs.field, hit.position, normal, tuning);
    iterations += ao_steps;

    let shadow_seed = grid_step * grid_step;
    let mut direct = Vec3::splat(0.0);
    for light in inputs.lights {
        let toward = light.toward_light();
        let lambert = normal.dot(toward).max(0.0);
        if lambert == 0.0 {
            continue;
        }
        let (visibility, shadow_steps) =
            soft_shadow(inputs.field, hit.position, toward, shadow_seed, tuning);
        iterations += shadow_steps;
        direct = direct + (light.radiance() * (lambert * visibility));
    }

    let radiance = albedo * ((inputs.ambient * ao) + direct);
    PixelSample {
        color: tonemap(radiance),
        hit: true,
        iterations,
    }
}

/// Renders a frame by scanline rows in parallel. Pixels are fully
/// independent; the only shared data is the read-only scene.
pub fn render_frame(settings: &RenderSettings, view: &View, inputs: &RenderInputs<'_>) -> RgbImage {
    let width = settings.width as usize;
    let height = settings.height as usize;
    let mut samples = vec![
        PixelSample {
            color: Vec3::splat(0.0),
            hit: false,
            iterations: 0,
        };
        width * height
    ];

    samples
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                let ray = view.primary_ray(
                    x as u32,
                    y as u32,
                    settings.width,
                    settings.height,
                    settings.projection,
                );
                *slot = shade_pixel(inputs, ray, &settings.tuning);
            }
        });

    let mut image = RgbImage::new(settings.width, settings.height);
    for y in 0..height {
        for x in 0..width {
            let sample = samples[(y * width) + x];
            let color = match settings.debug_view {
                Some(DebugView::Iterations) => iteration_color(sample.iterations),
                None => sample.color,
            };
            image.put_pixel(x as u32, y as u32, to_rgb(color));
        }
    }
    image
}

/// Banded false-color view of iteration cost: cool blue for cheap
/// pixels through green and amber to red, with smooth transitions at
/// three fixed thresholds.
pub fn iteration_color(iterations: u32) -> Vec3 {
    const CHEAP: Vec3 = Vec3::new(0.05, 0.09, 0.35);
    const MODERATE: Vec3 = Vec3::new(0.10, 0.60, 0.25);
    const COSTLY: Vec3 = Vec3::new(0.92, 0.78, 0.12);
    const SATURATED: Vec3 = Vec3::new(0.90, 0.12, 0.08);

    let t = iterations as f32;
    let mut color = CHEAP.lerp(MODERATE, smoothstep(0.0, 96.0, t));
    color = color.lerp(COSTLY, smoothstep(96.0, 384.0, t));
    color.lerp(SATURATED, smoothstep(384.0, 1024.0, t))
}

fn to_rgb(color: Vec3) -> Rgb<u8> {
    let c = color.clamp01();
    Rgb([
        (c.x * 255.999) as u8,
        (c.y * 255.999) as u8,
        (c.z * 255.999) as u8,
    ])
}
