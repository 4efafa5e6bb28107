//! Mapping from real-world kilometers to scene units.
//!
//! Real planetary radii span about three orders of magnitude and orbital
//! distances about four; rendered verbatim, the inner system is invisible and
//! the outer system unreachable. The linear mode anchors radii to the sun and
//! distances to the earth orbit; the compressed mode additionally bends
//! distances through a power law and exaggerates the smallest radii. Both
//! mappings are monotone, so the ordering of real semimajor axes is preserved.

use crate::config::{ConfigurationError, ScaleMode, SolarSystemConfig};
use crate::orbital::bodies::{AU_KM, EARTH_SEMIMAJOR_AXIS_KM, SUN_RADIUS_KM};

/// Converts real radii and distances (km) into scene units.
#[derive(Clone, Copy, Debug)]
pub enum ScaleModel {
    Linear {
        /// Scene units per km of body radius.
        size_scale: f32,
        /// Scene units per km of semimajor axis.
        distance_scale: f32,
        min_radius: f32,
    },
    Compressed {
        sun_scene_radius: f32,
        /// Scene units of one astronomical unit before the exponent.
        base_unit: f32,
        distance_exponent: f32,
        size_exaggeration: f32,
        /// Bodies below this fraction of the sun radius get exaggerated.
        exaggeration_threshold: f32,
        min_radius: f32,
    },
}

impl ScaleModel {
    /// Build the scale model described by `config`, validating every factor.
    pub fn from_config(config: &SolarSystemConfig) -> Result<Self, ConfigurationError> {
        let positive = |name: &'static str, value: f32| {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(ConfigurationError::NonPositiveScale { name, value })
            }
        };
        let min_radius = positive("min_radius", config.min_radius)?;
        let sun_scene_radius = positive("sun_scene_radius", config.sun_scene_radius)?;
        let earth_scene_distance = positive("earth_scene_distance", config.earth_scene_distance)?;

        match config.scale_mode {
            ScaleMode::Linear => {
                let scene_scale = positive("scene_scale", config.scene_scale)?;
                Ok(Self::Linear {
                    size_scale: sun_scene_radius / SUN_RADIUS_KM * scene_scale,
                    distance_scale: earth_scene_distance / EARTH_SEMIMAJOR_AXIS_KM * scene_scale,
                    min_radius,
                })
            }
            ScaleMode::Compressed => {
                if !(config.distance_exponent > 0.0 && config.distance_exponent <= 1.0) {
                    return Err(ConfigurationError::DistanceExponentOutOfRange(
                        config.distance_exponent,
                    ));
                }
                Ok(Self::Compressed {
                    sun_scene_radius,
                    base_unit: earth_scene_distance,
                    distance_exponent: config.distance_exponent,
                    size_exaggeration: positive("size_exaggeration", config.size_exaggeration)?,
                    exaggeration_threshold: positive(
                        "exaggeration_threshold",
                        config.exaggeration_threshold,
                    )?,
                    min_radius,
                })
            }
        }
    }

    /// Scene radius for a body of real radius `km`. Degenerate inputs clamp
    /// to the radius floor.
    pub fn to_scene_radius(&self, km: f32) -> f32 {
        match *self {
            Self::Linear {
                size_scale,
                min_radius,
                ..
            } => (km * size_scale).max(min_radius),
            Self::Compressed {
                sun_scene_radius,
                size_exaggeration,
                exaggeration_threshold,
                min_radius,
                ..
            } => {
                let ratio = km / SUN_RADIUS_KM;
                let ratio = if ratio < exaggeration_threshold {
                    ratio * size_exaggeration
                } else {
                    ratio
                };
                (sun_scene_radius * ratio).max(min_radius)
            }
        }
    }

    /// Scene distance for a real semimajor axis of `km`.
    pub fn to_scene_distance(&self, km: f32) -> f32 {
        let km = km.max(0.0);
        match *self {
            Self::Linear { distance_scale, .. } => km * distance_scale,
            Self::Compressed {
                base_unit,
                distance_exponent,
                ..
            } => base_unit * (km / AU_KM).powf(distance_exponent),
        }
    }
}
