//! Orbital model: scaling, the body table, the transform hierarchy, and
//! simulation time.

use bevy::prelude::*;

pub mod bodies;
pub mod hierarchy;
pub mod scale;
pub mod time;

pub use bodies::{BodyRegistry, ShadingKind};
pub use hierarchy::{BodyMesh, spawn_solar_system};
pub use scale::ScaleModel;
pub use time::{SimulationClock, advance_simulation_clock};

use crate::SimSet;
use hierarchy::{advance_orbits, advance_spins};

/// Plugin for the orbital hierarchy and simulation time. Expects a
/// [`BodyRegistry`] resource to be present before startup.
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Startup, spawn_solar_system)
            .add_systems(Update, advance_simulation_clock.in_set(SimSet::Clock))
            .add_systems(Update, (advance_orbits, advance_spins).in_set(SimSet::Orbits));
    }
}
