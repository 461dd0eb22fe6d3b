use serde::Deserialize;
use std::path::Path;

use crate::math::{Quat, Vec3};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    pub scene: String,
    #[serde(default = "default_quality")]
    pub quality: String,
    pub camera_position: [f32; 3],
    pub camera_rotation: [f32; 4],
    #[serde(default = "default_projection")]
    pub projection: String,
    #[serde(default)]
    pub debug_view: Option<String>,
    #[serde(default)]
    pub march_max_steps: Option<u32>,
    #[serde(default)]
    pub shadow_max_steps: Option<u32>,
    #[serde(default)]
    pub ao_samples: Option<u32>,
    #[serde(default)]
    pub max_distance: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<RenderFrameConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RenderFrameConfig),
    Batch(RenderBatchConfig),
}

fn default_quality() -> String {
    "balanced".to_owned()
}

fn default_projection() -> String {
    "perspective".to_owned()
}

pub fn validate_config(config: &RenderFrameConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err("width and height must be positive".into());
    }

    let output_parent = Path::new(&config.output_path)
        .parent()
        .ok_or("outputPath must include a parent directory")?;
    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(format!(
            "output directory does not exist: {}",
            output_parent.display()
        ));
    }

    if config.scene.trim().is_empty() {
        return Err("scene must be a non-empty identifier".into());
    }

    if !config.camera_position.iter().all(|v| v.is_finite()) {
        return Err("cameraPosition must contain finite values".into());
    }
    if !config.camera_rotation.iter().all(|v| v.is_finite()) {
        return Err("cameraRotation must contain finite values".into());
    }

    let rotation = Quat::new(
        config.camera_rotation[0],
        config.camera_rotation[1],
        config.camera_rotation[2],
        config.camera_rotation[3],
    );
    let len = rotation.length();
    if len < 0.0001 {
        return Err("cameraRotation must not be the zero quaternion".into());
    }
    if (len - 1.0).abs() > 0.05 {
        return Err(format!(
            "cameraRotation must be close to unit length, got {len}"
        ));
    }

    Ok(())
}

pub fn vec3_from(value: [f32; 3]) -> Vec3 {
    Vec3::new(value[0], value[1], value[2])
}
