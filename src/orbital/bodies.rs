//! The astronomical body table and the registry built from it.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::config::ConfigurationError;
use crate::orbital::scale::ScaleModel;

pub const SUN_RADIUS_KM: f32 = 695_700.0;
pub const EARTH_SEMIMAJOR_AXIS_KM: f32 = 149_598_023.0;
pub const AU_KM: f32 = 149_597_870.7;

/// How the renderer shades a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingKind {
    /// Self-illuminated, ignores scene lighting (the sun).
    Unlit,
    /// Shaded by the sun light.
    Lit,
}

/// Ring annulus measured in real kilometers.
#[derive(Clone, Copy, Debug)]
pub struct RingDef {
    pub inner_km: f32,
    pub outer_km: f32,
}

/// One row of the astronomical table. Angular speeds are signed radians per
/// simulated second at 1x time scale; negative values encode retrograde
/// motion. Satellites name their host via `parent`, and the host row must
/// precede them in the table.
pub struct BodyDef {
    pub name: &'static str,
    pub radius_km: f32,
    /// Semimajor axis, measured from the parent body.
    pub semimajor_axis_km: f32,
    pub orbit_speed: f32,
    pub spin_speed: f32,
    pub axial_tilt_deg: f32,
    pub parent: Option<&'static str>,
    pub ring: Option<RingDef>,
    pub shading: ShadingKind,
    pub texture: Option<&'static str>,
}

/// Real-world radii and semimajor axes with tuned angular-rate constants.
pub const BODIES: &[BodyDef] = &[
    BodyDef {
        name: "sun",
        radius_km: SUN_RADIUS_KM,
        semimajor_axis_km: 0.0,
        orbit_speed: 0.0,
        spin_speed: 0.005,
        axial_tilt_deg: 7.25,
        parent: None,
        ring: None,
        shading: ShadingKind::Unlit,
        texture: Some("texture_sun.jpg"),
    },
    BodyDef {
        name: "mercury",
        radius_km: 2_439.7,
        semimajor_axis_km: 57_909_227.0,
        orbit_speed: 0.0414,
        spin_speed: 0.088,
        axial_tilt_deg: 0.03,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_mercury.jpg"),
    },
    BodyDef {
        name: "venus",
        radius_km: 6_051.8,
        semimajor_axis_km: 108_209_475.0,
        orbit_speed: -0.0163,
        spin_speed: 0.225,
        axial_tilt_deg: 177.4,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_venus.jpg"),
    },
    BodyDef {
        name: "earth",
        radius_km: 6_371.0,
        semimajor_axis_km: EARTH_SEMIMAJOR_AXIS_KM,
        orbit_speed: 0.01,
        spin_speed: 0.365,
        axial_tilt_deg: 23.44,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_earth.jpg"),
    },
    BodyDef {
        name: "moon",
        radius_km: 1_737.4,
        semimajor_axis_km: 384_400.0,
        orbit_speed: 0.13,
        spin_speed: 0.13,
        axial_tilt_deg: 6.68,
        parent: Some("earth"),
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_moon.jpg"),
    },
    BodyDef {
        name: "mars",
        radius_km: 3_389.5,
        semimajor_axis_km: 227_943_824.0,
        orbit_speed: 0.0053,
        spin_speed: 0.366,
        axial_tilt_deg: 25.19,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_mars.jpg"),
    },
    BodyDef {
        name: "jupiter",
        radius_km: 69_911.0,
        semimajor_axis_km: 778_340_821.0,
        orbit_speed: 0.00084,
        spin_speed: 0.4333,
        axial_tilt_deg: 3.13,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_jupiter.jpg"),
    },
    BodyDef {
        name: "saturn",
        radius_km: 58_232.0,
        semimajor_axis_km: 1_426_666_422.0,
        orbit_speed: 0.00034,
        spin_speed: 0.10759,
        axial_tilt_deg: 26.73,
        parent: None,
        ring: Some(RingDef {
            inner_km: 74_500.0,
            outer_km: 136_780.0,
        }),
        shading: ShadingKind::Lit,
        texture: Some("texture_saturn.jpg"),
    },
    BodyDef {
        name: "uranus",
        radius_km: 25_362.0,
        semimajor_axis_km: 2_870_658_186.0,
        orbit_speed: -0.00012,
        spin_speed: 0.30687,
        axial_tilt_deg: 97.77,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_uranus.jpg"),
    },
    BodyDef {
        name: "neptune",
        radius_km: 24_622.0,
        semimajor_axis_km: 4_498_396_441.0,
        orbit_speed: 0.00006,
        spin_speed: 0.60190,
        axial_tilt_deg: 28.32,
        parent: None,
        ring: None,
        shading: ShadingKind::Lit,
        texture: Some("texture_neptune.jpg"),
    },
];

/// Ring annulus in scene units.
#[derive(Clone, Copy, Debug)]
pub struct RingScene {
    pub inner: f32,
    pub outer: f32,
}

/// A body after scaling: everything the hierarchy and the renderer need.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: &'static str,
    pub scene_radius: f32,
    /// Distance from the parent's center in scene units; zero for the root.
    pub orbit_distance: f32,
    pub orbit_speed: f32,
    pub spin_speed: f32,
    /// Radians.
    pub axial_tilt: f32,
    /// Index of the host body in the registry, for satellites.
    pub parent: Option<usize>,
    pub ring: Option<RingScene>,
    pub shading: ShadingKind,
    pub texture: Option<&'static str>,
}

/// All bodies in table order with parent links resolved to indices. The
/// order is the advance/iteration order and is stable for the lifetime of
/// the registry.
#[derive(Resource, Debug)]
pub struct BodyRegistry {
    pub bodies: Vec<CelestialBody>,
}

impl BodyRegistry {
    /// Resolve the table through `scale` into scene-space bodies. An
    /// unresolvable parent key is a [`ConfigurationError::UnknownBody`];
    /// nothing is built in that case.
    pub fn build(table: &[BodyDef], scale: &ScaleModel) -> Result<Self, ConfigurationError> {
        let mut bodies = Vec::with_capacity(table.len());
        let mut index_by_name: HashMap<&str, usize> = HashMap::with_capacity(table.len());

        for def in table {
            let parent = match def.parent {
                None => None,
                Some(key) => Some(
                    *index_by_name
                        .get(key)
                        .ok_or_else(|| ConfigurationError::UnknownBody(key.to_string()))?,
                ),
            };
            let body = CelestialBody {
                name: def.name,
                scene_radius: scale.to_scene_radius(def.radius_km),
                orbit_distance: scale.to_scene_distance(def.semimajor_axis_km),
                orbit_speed: def.orbit_speed,
                spin_speed: def.spin_speed,
                axial_tilt: def.axial_tilt_deg.to_radians(),
                parent,
                ring: def.ring.map(|ring| RingScene {
                    inner: scale.to_scene_radius(ring.inner_km),
                    outer: scale.to_scene_radius(ring.outer_km),
                }),
                shading: def.shading,
                texture: def.texture,
            };
            index_by_name.insert(def.name, bodies.len());
            bodies.push(body);
        }

        Ok(Self { bodies })
    }

    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|body| body.name == name)
    }
}
