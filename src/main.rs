use std::collections::HashMap;
use std::io::{self, Read};
use std::time::Instant;

use anyhow::{bail, Context};

use voxmarch::config::{validate_config, IncomingConfig};
use voxmarch::domain::presets::build_scene;
use voxmarch::render::validation::validate_scene;
use voxmarch::render::{render_frame, RenderInputs, RenderSettings, View};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("reading config from stdin")?;

    let incoming: IncomingConfig = serde_json::from_str(&raw).context("parsing config JSON")?;
    let frames = match incoming {
        IncomingConfig::Single(frame) => vec![frame],
        IncomingConfig::Batch(batch) => batch.frames,
    };
    if frames.is_empty() {
        bail!("frames array must not be empty");
    }

    let total = frames.len();
    let mut prepared_frames = Vec::with_capacity(total);
    for frame in &frames {
        validate_config(frame).map_err(anyhow::Error::msg)?;
        prepared_frames.push((
            RenderSettings::from_frame(frame),
            View::from_frame(frame),
            frame.scene.clone(),
        ));
    }

    let mut scene_cache = HashMap::new();
    for (index, (settings, view, scene_id)) in prepared_frames.iter().enumerate() {
        let cache_key = scene_id.to_ascii_lowercase();
        if !scene_cache.contains_key(&cache_key) {
            let build_started = Instant::now();
            let scene = build_scene(scene_id)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("building scene '{scene_id}'"))?;
            validate_scene(&scene)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("validating scene '{scene_id}'"))?;
            tracing::info!(
                scene = scene.id,
                elapsed_ms = build_started.elapsed().as_millis() as u64,
                "scene grid baked"
            );
            scene_cache.insert(cache_key.clone(), scene);
        }
        let scene = scene_cache
            .get(&cache_key)
            .with_context(|| format!("internal error: scene cache miss for '{scene_id}'"))?;

        let inputs = RenderInputs::from_scene(scene);
        let started = Instant::now();
        let image = render_frame(settings, view, &inputs);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        image
            .save(&settings.output_path)
            .with_context(|| format!("saving {}", settings.output_path))?;

        tracing::info!(
            frame = index + 1,
            total,
            scene = scene.id,
            width = settings.width,
            height = settings.height,
            elapsed_ms,
            output = %settings.output_path,
            "frame rendered"
        );
    }

    Ok(())
}
