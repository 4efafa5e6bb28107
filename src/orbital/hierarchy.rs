//! The nested transform hierarchy of orbit and spin nodes.
//!
//! Every orbiting body owns one rotation-only orbit node; its mesh hangs off
//! that node at the scaled orbit distance. A satellite's orbit node is
//! parented to the host body's mesh, so the satellite's world position
//! composes with the host's orbital motion through the scene graph; the
//! advance systems only ever integrate independent angles.

use bevy::prelude::*;

use crate::orbital::bodies::BodyRegistry;
use crate::orbital::time::SimulationClock;

/// Root of the whole system; everything orbits around this.
#[derive(Component)]
pub struct SystemCenter;

/// Rotation-only node carrying a body's orbital angle about the vertical
/// axis. Never reparented after spawn.
#[derive(Component, Debug)]
pub struct OrbitNode {
    /// Radians. Wraparound past 2π is left unnormalized; downstream rotation
    /// is periodic anyway.
    pub angle: f32,
    pub angular_speed: f32,
}

impl OrbitNode {
    pub fn new(angular_speed: f32) -> Self {
        Self {
            angle: 0.0,
            angular_speed,
        }
    }

    pub fn advance(&mut self, delta_seconds: f32) {
        self.angle += self.angular_speed * delta_seconds;
    }
}

/// Axial rotation of a body mesh, tilted off the vertical.
#[derive(Component, Debug)]
pub struct BodySpin {
    pub angle: f32,
    pub angular_speed: f32,
    /// Radians.
    pub axial_tilt: f32,
}

impl BodySpin {
    pub fn advance(&mut self, delta_seconds: f32) {
        self.angle += self.angular_speed * delta_seconds;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.axial_tilt) * Quat::from_rotation_y(self.angle)
    }
}

/// Links a mesh entity back to its row in the [`BodyRegistry`], for the
/// renderer to resolve visuals.
#[derive(Component, Debug)]
pub struct BodyMesh(pub usize);

/// Spawn the transform skeleton for every registry body. Meshes and
/// materials are attached by the visualization layer afterwards.
pub fn spawn_solar_system(mut commands: Commands, registry: Res<BodyRegistry>) {
    let center = commands
        .spawn((
            SystemCenter,
            Transform::default(),
            Visibility::default(),
            Name::new("system center"),
        ))
        .id();

    let mut mesh_entities: Vec<Entity> = Vec::with_capacity(registry.bodies.len());
    for (index, body) in registry.bodies.iter().enumerate() {
        // Satellites attach to the host's mesh, root bodies to the center.
        let anchor = match body.parent {
            Some(parent_index) => mesh_entities[parent_index],
            None => center,
        };

        let mesh_parent = if body.orbit_distance > 0.0 {
            let orbit = commands
                .spawn((
                    OrbitNode::new(body.orbit_speed),
                    Transform::default(),
                    Visibility::default(),
                    Name::new(format!("{} orbit", body.name)),
                ))
                .id();
            commands.entity(anchor).add_child(orbit);
            orbit
        } else {
            anchor
        };

        let mesh = commands
            .spawn((
                BodyMesh(index),
                BodySpin {
                    angle: 0.0,
                    angular_speed: body.spin_speed,
                    axial_tilt: body.axial_tilt,
                },
                Transform::from_xyz(body.orbit_distance, 0.0, 0.0),
                Visibility::default(),
                Name::new(body.name),
            ))
            .id();
        commands.entity(mesh_parent).add_child(mesh);
        mesh_entities.push(mesh);
    }

    info!("spawned {} bodies", registry.bodies.len());
}

/// Integrate every orbital angle by the frame's scaled delta.
pub fn advance_orbits(
    clock: Res<SimulationClock>,
    mut orbits: Query<(&mut OrbitNode, &mut Transform)>,
) {
    let delta = clock.scaled_delta();
    for (mut orbit, mut transform) in orbits.iter_mut() {
        orbit.advance(delta);
        transform.rotation = Quat::from_rotation_y(orbit.angle);
    }
}

/// Integrate every spin angle by the frame's scaled delta.
pub fn advance_spins(clock: Res<SimulationClock>, mut spins: Query<(&mut BodySpin, &mut Transform)>) {
    let delta = clock.scaled_delta();
    for (mut spin, mut transform) in spins.iter_mut() {
        spin.advance(delta);
        transform.rotation = spin.rotation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolarSystemConfig;
    use crate::orbital::bodies::{BODIES, BodyRegistry, BodyDef, ShadingKind};
    use crate::orbital::scale::ScaleModel;
    use bevy::ecs::system::RunSystemOnce;

    fn sun_and_earth() -> BodyRegistry {
        let table = [
            BodyDef {
                name: "sun",
                radius_km: 10.0,
                semimajor_axis_km: 0.0,
                orbit_speed: 0.0,
                spin_speed: 0.005,
                axial_tilt_deg: 0.0,
                parent: None,
                ring: None,
                shading: ShadingKind::Unlit,
                texture: None,
            },
            BodyDef {
                name: "earth",
                radius_km: 1.0,
                semimajor_axis_km: 100.0,
                orbit_speed: 0.01,
                spin_speed: 0.365,
                axial_tilt_deg: 0.0,
                parent: None,
                ring: None,
                shading: ShadingKind::Lit,
                texture: None,
            },
        ];
        // Identity scales: the table's kilometers are scene units.
        let scale = ScaleModel::Linear {
            size_scale: 1.0,
            distance_scale: 1.0,
            min_radius: 0.01,
        };
        BodyRegistry::build(&table, &scale).unwrap()
    }

    #[test]
    fn test_two_body_advance_sequence() {
        let registry = sun_and_earth();
        let earth = registry.get("earth").unwrap();
        assert_eq!(earth.orbit_distance, 100.0);

        let mut node = OrbitNode::new(earth.orbit_speed);
        node.advance(1.0);
        assert!((node.angle - 0.01).abs() < 1e-7);
        node.advance(2.0);
        assert!((node.angle - 0.03).abs() < 1e-7);
    }

    #[test]
    fn test_advance_is_frame_rate_independent() {
        let mut one_step = OrbitNode::new(0.0414);
        one_step.advance(1.0);

        let mut ten_steps = OrbitNode::new(0.0414);
        for _ in 0..10 {
            ten_steps.advance(0.1);
        }

        assert!((one_step.angle - ten_steps.angle).abs() < 1e-5);
    }

    #[test]
    fn test_spin_rotation_composes_tilt_then_angle() {
        let spin = BodySpin {
            angle: 1.0,
            angular_speed: 0.0,
            axial_tilt: 0.5,
        };
        let expected = Quat::from_rotation_z(0.5) * Quat::from_rotation_y(1.0);
        assert!(spin.rotation().angle_between(expected) < 1e-6);
    }

    #[test]
    fn test_spawned_hierarchy_nests_satellites_under_host_mesh() {
        let mut world = World::new();
        let scale = ScaleModel::from_config(&SolarSystemConfig::default()).unwrap();
        world.insert_resource(BodyRegistry::build(BODIES, &scale).unwrap());
        world.run_system_once(spawn_solar_system).unwrap();

        let registry = world.remove_resource::<BodyRegistry>().unwrap();
        let orbit_count = world.query::<&OrbitNode>().iter(&world).count();
        // every body except the sun orbits something
        assert_eq!(orbit_count, registry.bodies.len() - 1);

        // the moon's orbit node is a child of the earth mesh
        let mut meshes = world.query::<(Entity, &BodyMesh)>();
        let earth_mesh = meshes
            .iter(&world)
            .find(|(_, mesh)| registry.bodies[mesh.0].name == "earth")
            .map(|(entity, _)| entity)
            .unwrap();
        let children = world.entity(earth_mesh).get::<Children>().unwrap();
        let mut moon_orbits_earth = false;
        for child in children.iter() {
            if world.entity(child).get::<OrbitNode>().is_some() {
                moon_orbits_earth = true;
            }
        }
        assert!(moon_orbits_earth);
    }
}
