//! VR locomotion: controller registry, movement rules, and the player rig.

use bevy::prelude::*;

pub mod controller;
pub mod input;
pub mod rig;

pub use controller::{Locomotion, LocomotionConfig, RigDelta};
pub use input::{ControllerRegistry, InputSourceState};
pub use rig::{MainCamera, Rig, VrSession};

use crate::SimSet;
use input::sync_controller_registry;
use rig::{apply_session_transitions, drive_rig, in_vr_session};

/// Plugin for rig movement from VR controller input.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerRegistry>()
            .init_resource::<Locomotion>()
            .init_resource::<LocomotionConfig>()
            .init_resource::<VrSession>()
            .add_systems(
                Update,
                (apply_session_transitions, sync_controller_registry).in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                drive_rig.in_set(SimSet::Locomotion).run_if(in_vr_session),
            );
    }
}
