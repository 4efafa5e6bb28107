//! The player rig and the VR session lifecycle.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::locomotion::controller::{Locomotion, LocomotionConfig};
use crate::locomotion::input::ControllerRegistry;
use crate::orbital::time::SimulationClock;

/// Where the rig rests outside a VR session.
pub const LOBBY_POSITION: Vec3 = Vec3::ZERO;
/// Where the rig arrives when a session starts, back from the sun along +Z.
pub const ARRIVAL_POSITION: Vec3 = Vec3::new(0.0, 0.0, 150.0);

/// The movable reference frame carrying the camera. Only the locomotion
/// pass and the session transitions write to it.
#[derive(Component, Debug, Default)]
pub struct Rig {
    /// Accumulated snap-turn yaw, radians.
    pub yaw: f32,
}

/// Marker for the camera the locomotion pass derives its heading from.
#[derive(Component)]
pub struct MainCamera;

/// Session state. `requested` is written by the session toggle channel;
/// the transition system reconciles `active` with it.
#[derive(Resource, Debug, Default)]
pub struct VrSession {
    pub requested: bool,
    pub active: bool,
}

/// Run condition: locomotion only drives the rig while presenting.
pub fn in_vr_session(session: Res<VrSession>) -> bool {
    session.active
}

/// Rig position for a session edge.
pub fn session_target_position(entering: bool) -> Vec3 {
    if entering {
        ARRIVAL_POSITION
    } else {
        LOBBY_POSITION
    }
}

/// Apply a pending session start or end: relocate the rig and flip the
/// desktop orbit controls in the same frame, so no frame renders with a
/// half-applied session.
pub fn apply_session_transitions(
    mut session: ResMut<VrSession>,
    mut rigs: Query<(&mut Rig, &mut Transform)>,
    mut orbit_controls: Query<&mut PanOrbitCamera>,
) {
    if session.requested == session.active {
        return;
    }
    let entering = session.requested;

    for (mut rig, mut transform) in rigs.iter_mut() {
        rig.yaw = 0.0;
        transform.translation = session_target_position(entering);
        transform.rotation = Quat::IDENTITY;
    }
    for mut controls in orbit_controls.iter_mut() {
        controls.enabled = !entering;
    }

    session.active = entering;
    info!(
        "VR session {}",
        if entering { "started" } else { "ended" }
    );
}

/// Feed the frame's controller state through the locomotion rules and move
/// the rig.
pub fn drive_rig(
    clock: Res<SimulationClock>,
    registry: Res<ControllerRegistry>,
    config: Res<LocomotionConfig>,
    mut locomotion: ResMut<Locomotion>,
    camera: Query<&GlobalTransform, With<MainCamera>>,
    mut rigs: Query<(&mut Rig, &mut Transform), Without<MainCamera>>,
) {
    let Ok(camera_transform) = camera.single() else {
        return;
    };
    let (_, camera_rotation, _) = camera_transform.to_scale_rotation_translation();
    let forward = camera_rotation * Vec3::NEG_Z;

    let delta = locomotion.update(&config, registry.slots(), forward, clock.raw_delta());

    for (mut rig, mut transform) in rigs.iter_mut() {
        transform.translation += delta.translation;
        rig.yaw += delta.yaw;
        transform.rotation = Quat::from_rotation_y(rig.yaw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_session_end_resets_rig_to_lobby_exactly() {
        let mut world = World::new();
        world.insert_resource(VrSession {
            requested: false,
            active: true,
        });
        let rig = world
            .spawn((
                Rig { yaw: 1.3 },
                Transform::from_xyz(42.0, -3.0, 961.5),
            ))
            .id();

        world.run_system_once(apply_session_transitions).unwrap();

        let transform = world.entity(rig).get::<Transform>().unwrap();
        assert_eq!(transform.translation, LOBBY_POSITION);
        assert_eq!(world.entity(rig).get::<Rig>().unwrap().yaw, 0.0);
        assert!(!world.resource::<VrSession>().active);
    }

    #[test]
    fn test_session_start_places_rig_at_arrival() {
        let mut world = World::new();
        world.insert_resource(VrSession {
            requested: true,
            active: false,
        });
        let rig = world.spawn((Rig::default(), Transform::default())).id();

        world.run_system_once(apply_session_transitions).unwrap();

        let transform = world.entity(rig).get::<Transform>().unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 150.0));
        assert!(world.resource::<VrSession>().active);
    }

    #[test]
    fn test_settled_session_is_left_alone() {
        let mut world = World::new();
        world.insert_resource(VrSession {
            requested: true,
            active: true,
        });
        let rig = world
            .spawn((Rig::default(), Transform::from_xyz(7.0, 0.0, -2.0)))
            .id();

        world.run_system_once(apply_session_transitions).unwrap();

        // no pending edge, the rig keeps whatever position locomotion gave it
        let transform = world.entity(rig).get::<Transform>().unwrap();
        assert_eq!(transform.translation, Vec3::new(7.0, 0.0, -2.0));
    }
}
