use crate::config::RenderFrameConfig;
use crate::render::view::Projection;

/// Everything the kernel loops consume: iteration budgets and the
/// numeric constants of the march, shadow and AO estimators. The
/// budgets double as the cancellation mechanism; no loop runs past
/// them.
#[derive(Clone, Copy, Debug)]
pub struct RenderTuning {
    pub march_max_steps: u32,
    pub max_distance: f32,
    pub min_step: f32,
    pub refine_max_steps: u32,
    pub hit_epsilon: f32,
    pub shadow_max_steps: u32,
    pub shadow_sharpness: f32,
    pub ao_samples: u32,
    pub ao_near_radius: f32,
    pub ao_far_radius: f32,
    pub normal_smoothness: f32,
    pub texture_scale: f32,
}

impl Default for RenderTuning {
    fn default() -> Self {
        QualityPreset::Balanced.tuning()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum DebugView {
    /// False-color visualization of the total iteration count spent
    /// per pixel (march + refine + shadow + AO).
    Iterations,
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    pub projection: Projection,
    pub debug_view: Option<DebugView>,
    pub tuning: RenderTuning,
}

impl RenderSettings {
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        let preset = parse_quality(&frame.quality);
        let mut tuning = preset.tuning();

        if let Some(march_max_steps) = frame.march_max_steps {
            tuning.march_max_steps = march_max_steps.max(1);
        }
        if let Some(shadow_max_steps) = frame.shadow_max_steps {
            tuning.shadow_max_steps = shadow_max_steps.max(1);
        }
        if let Some(ao_samples) = frame.ao_samples {
            tuning.ao_samples = ao_samples.max(1);
        }
        if let Some(max_distance) = frame.max_distance {
            tuning.max_distance = max_distance.max(1.0);
        }

        Self {
            width: frame.width,
            height: frame.height,
            output_path: frame.output_path.clone(),
            projection: parse_projection(&frame.projection),
            debug_view: parse_debug_view(frame.debug_view.as_deref()),
            tuning,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum QualityPreset {
    Preview,
    Balanced,
    Final,
}

impl QualityPreset {
    fn tuning(self) -> RenderTuning {
        match self {
            Self::Preview => RenderTuning {
                march_max_steps: 384,
                max_distance: 256.0,
                min_step: 0.01,
                refine_max_steps: 32,
                hit_epsilon: 0.001,
                shadow_max_steps: 48,
                shadow_sharpness: 6.0,
                ao_samples: 8,
                ao_near_radius: 0.35,
                ao_far_radius: 2.2,
                normal_smoothness: 0.0,
                texture_scale: 0.25,
            },
            Self::Balanced => RenderTuning {
                march_max_steps: 1024,
                max_distance: 256.0,
                min_step: 0.01,
                refine_max_steps: 64,
                hit_epsilon: 0.001,
                shadow_max_steps: 96,
                shadow_sharpness: 8.0,
                ao_samples: 16,
                ao_near_radius: 0.35,
                ao_far_radius: 2.2,
                normal_smoothness: 0.0,
                texture_scale: 0.25,
            },
            Self::Final => RenderTuning {
                march_max_steps: 1024,
                max_distance: 1600.0,
                min_step: 0.01,
                refine_max_steps: 256,
                hit_epsilon: 0.001,
                shadow_max_steps: 160,
                shadow_sharpness: 13.0,
                ao_samples: 32,
                ao_near_radius: 0.35,
                ao_far_radius: 2.2,
                normal_smoothness: 0.0,
                texture_scale: 0.25,
            },
        }
    }
}

fn parse_quality(value: &str) -> QualityPreset {
    if value.eq_ignore_ascii_case("preview") {
        return QualityPreset::Preview;
    }
    if value.eq_ignore_ascii_case("final") {
        return QualityPreset::Final;
    }
    QualityPreset::Balanced
}

fn parse_projection(value: &str) -> Projection {
    if value.eq_ignore_ascii_case("orthographic") {
        return Projection::Orthographic { half_height: 8.0 };
    }
    Projection::Perspective
}

fn parse_debug_view(value: Option<&str>) -> Option<DebugView> {
    match value {
        Some(raw) if raw.eq_ignore_ascii_case("iterations") => Some(DebugView::Iterations),
        _ => None,
    }
}
