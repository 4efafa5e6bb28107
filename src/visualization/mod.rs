//! Rendering collaborator: meshes, materials, lights, and the sky.
//!
//! The orbital hierarchy only spawns transforms; this module decorates those
//! entities with drawable components. Nothing here mutates angles or the rig.

use bevy::prelude::*;

pub mod bodies;
pub mod skybox;

pub use bodies::attach_body_visuals;
pub use skybox::spawn_skybox;

use crate::orbital::spawn_solar_system;

/// Plugin for body visuals and scene lighting.
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (attach_body_visuals.after(spawn_solar_system), spawn_skybox),
        );
    }
}
