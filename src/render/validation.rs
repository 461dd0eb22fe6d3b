use crate::domain::Scene;

pub const MAX_LIGHTS: usize = 8;

/// Sanity checks a preset must pass before any pixel is traced.
pub fn validate_scene(scene: &Scene) -> Result<(), String> {
    if scene.palette.is_empty() {
        return Err(format!("scene '{}' has an empty material palette", scene.id));
    }
    if scene.lights.is_empty() {
        return Err(format!("scene '{}' has no lights", scene.id));
    }
    if scene.lights.len() > MAX_LIGHTS {
        return Err(format!(
            "scene '{}' has {} lights but the renderer supports at most {}",
            scene.id,
            scene.lights.len(),
            MAX_LIGHTS
        ));
    }

    for light in &scene.lights {
        light
            .validate_physical()
            .map_err(|error| format!("light '{}': {error}", light.name))?;
    }

    if !scene.ambient.is_finite()
        || scene.ambient.x < 0.0
        || scene.ambient.y < 0.0
        || scene.ambient.z < 0.0
    {
        return Err(format!(
            "scene '{}' ambient color must be finite and non-negative",
            scene.id
        ));
    }

    if let Some(atlas) = &scene.atlas {
        for material in &scene.palette {
            if let Some(tile) = material.atlas_tile {
                if tile >= atlas.tiles() {
                    return Err(format!(
                        "material '{}' references atlas tile {} but the atlas has {}",
                        material.name,
                        tile,
                        atlas.tiles()
                    ));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets::build_scene;

    #[test]
    fn shipped_preset_validates() {
        let scene = build_scene("blocks_on_plane").unwrap();
        assert!(validate_scene(&scene).is_ok());
    }

    #[test]
    fn rejects_scene_without_lights() {
        let mut scene = build_scene("blocks_on_plane").unwrap();
        scene.lights.clear();
        assert!(validate_scene(&scene).is_err());
    }

    #[test]
    fn rejects_out_of_range_atlas_tile() {
        let mut scene = build_scene("blocks_on_plane").unwrap();
        scene.palette[0].atlas_tile = Some(99);
        assert!(validate_scene(&scene).is_err());
    }
}
