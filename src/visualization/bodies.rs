//! Body meshes, materials, rings, and the sun light.

use std::f32::consts::FRAC_PI_2;

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::orbital::bodies::{CelestialBody, RingScene};
use crate::orbital::{BodyMesh, BodyRegistry, ShadingKind};

/// Irradiance at the earth orbit, W/m^2. Scales the sun light so brightness
/// falls off plausibly across the system.
const SOLAR_CONSTANT: f32 = 1_361.0;

#[derive(Component)]
pub struct SunLight;

/// Give every spawned body a sphere mesh and a material resolved from its
/// shading kind, plus the sun point light and any rings.
pub fn attach_body_visuals(
    mut commands: Commands,
    registry: Res<BodyRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    bodies: Query<(Entity, &BodyMesh)>,
) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 120.0,
        ..default()
    });

    let earth_distance = registry
        .get("earth")
        .map(|earth| earth.orbit_distance)
        .unwrap_or(90.0);

    for (entity, body_ref) in &bodies {
        let body = &registry.bodies[body_ref.0];
        // The root body gets finer tessellation; it is the biggest sphere on
        // screen by far.
        let (sectors, stacks) = if body.parent.is_none() && body.orbit_distance == 0.0 {
            (64, 32)
        } else {
            (32, 16)
        };
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(body.scene_radius).mesh().uv(sectors, stacks))),
            MeshMaterial3d(materials.add(body_material(body, &asset_server))),
        ));

        if body.shading == ShadingKind::Unlit && body.parent.is_none() {
            commands.entity(entity).with_children(|parent| {
                parent.spawn((
                    SunLight,
                    PointLight {
                        color: Color::WHITE,
                        intensity: SOLAR_CONSTANT * earth_distance * earth_distance * 40.0,
                        range: 10_000.0,
                        shadows_enabled: false,
                        ..default()
                    },
                ));
            });
        }

        if let Some(ring) = body.ring {
            spawn_ring(&mut commands, &mut meshes, &mut materials, entity, ring);
        }
    }
}

fn body_material(body: &CelestialBody, asset_server: &AssetServer) -> StandardMaterial {
    let texture = body.texture.map(|name| asset_server.load(name));
    match body.shading {
        ShadingKind::Unlit => StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.6),
            base_color_texture: texture,
            unlit: true,
            ..default()
        },
        ShadingKind::Lit => StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: texture,
            perceptual_roughness: 1.0,
            ..default()
        },
    }
}

/// Flat annulus in the body's equatorial plane; it inherits the host's tilt
/// and spin through the hierarchy.
fn spawn_ring(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    host: Entity,
    ring: RingScene,
) {
    let mesh = meshes.add(Annulus::new(ring.inner, ring.outer));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.76, 0.69, 0.55),
        perceptual_roughness: 1.0,
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    commands.entity(host).with_children(|parent| {
        parent.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Name::new("ring"),
        ));
    });
}
