//! Status HUD and keyboard control channels.

use bevy::prelude::*;

pub mod systems;

pub use systems::{handle_session_toggle, handle_time_scale_keys, update_status_text};

use crate::SimSet;
use systems::spawn_status_text;

/// Plugin for the on-screen status line and the time/session key bindings.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_status_text)
            .add_systems(Update, handle_time_scale_keys.in_set(SimSet::Clock))
            .add_systems(Update, handle_session_toggle.in_set(SimSet::Input))
            .add_systems(Update, update_status_text.in_set(SimSet::Locomotion));
    }
}
