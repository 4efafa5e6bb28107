//! Runtime configuration and build-time error taxonomy.
//!
//! All tunables recognized by the simulation live in [`SolarSystemConfig`].
//! The struct can be overridden from an optional `solar_system.json` next to
//! the executable; a missing file means defaults.

use std::fs;
use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;

/// Errors raised while constructing the solar system. These are fatal to
/// construction and never occur inside the frame loop; runtime input
/// anomalies (absent gamepads, short axis arrays) are treated as "no input
/// this frame" instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown body key `{0}` in the body table")]
    UnknownBody(String),

    #[error("scale factor `{name}` must be strictly positive, got {value}")]
    NonPositiveScale { name: &'static str, value: f32 },

    #[error("distance exponent must lie in (0, 1], got {0}")]
    DistanceExponentOutOfRange(f32),
}

/// How real-world measurements map into scene units.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Proportional radii and distances anchored to the sun radius and the
    /// earth orbit.
    #[default]
    Linear,
    /// Power-law distance compression with small-body exaggeration, for
    /// keeping the outer planets visible and reachable.
    Compressed,
}

/// Main configuration resource.
#[derive(Resource, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SolarSystemConfig {
    /// Scene radius of the sun, the anchor for all radius scaling.
    pub sun_scene_radius: f32,
    /// Scene distance of the earth orbit; doubles as the base unit for one
    /// astronomical unit in compressed mode.
    pub earth_scene_distance: f32,
    /// Radius floor so the smallest bodies stay visible.
    pub min_radius: f32,
    /// Uniform multiplier applied on top of the linear scales.
    pub scene_scale: f32,
    pub scale_mode: ScaleMode,
    /// Exponent for compressed-mode distances. Must lie in (0, 1] so the
    /// ordering of real semimajor axes survives the mapping.
    pub distance_exponent: f32,
    /// Radius boost applied to bodies below `exaggeration_threshold` of the
    /// sun radius in compressed mode.
    pub size_exaggeration: f32,
    pub exaggeration_threshold: f32,
    /// Rig movement speed in scene units per second.
    pub move_speed: f32,
    /// Minimum stick magnitude considered intentional input.
    pub deadzone: f32,
    /// Yaw step of one snap turn, radians.
    pub turn_angle: f32,
    /// Stick deflection that triggers a snap turn.
    pub turn_threshold: f32,
}

impl Default for SolarSystemConfig {
    fn default() -> Self {
        Self {
            sun_scene_radius: 5.0,
            earth_scene_distance: 30.0,
            min_radius: 0.05,
            scene_scale: 3.0,
            scale_mode: ScaleMode::Linear,
            distance_exponent: 0.6,
            size_exaggeration: 10.0,
            exaggeration_threshold: 0.05,
            move_speed: 60.0,
            deadzone: 0.1,
            turn_angle: std::f32::consts::FRAC_PI_6,
            turn_threshold: 0.5,
        }
    }
}

/// Load the config file at `path`, falling back to defaults when it does not
/// exist. A present-but-malformed file is an error rather than a silent
/// fallback.
pub fn load_or_default(path: &Path) -> anyhow::Result<SolarSystemConfig> {
    if !path.exists() {
        return Ok(SolarSystemConfig::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let cfg = SolarSystemConfig::default();
        assert_eq!(cfg.sun_scene_radius, 5.0);
        assert_eq!(cfg.earth_scene_distance, 30.0);
        assert_eq!(cfg.scene_scale, 3.0);
        assert_eq!(cfg.scale_mode, ScaleMode::Linear);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let cfg: SolarSystemConfig =
            serde_json::from_str(r#"{"move_speed": 12.5, "scale_mode": "compressed"}"#).unwrap();
        assert_eq!(cfg.move_speed, 12.5);
        assert_eq!(cfg.scale_mode, ScaleMode::Compressed);
        // untouched fields keep their defaults
        assert_eq!(cfg.deadzone, 0.1);
        assert_eq!(cfg.sun_scene_radius, 5.0);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let cfg = load_or_default(Path::new("definitely/not/a/file.json")).unwrap();
        assert_eq!(cfg.earth_scene_distance, 30.0);
    }
}
