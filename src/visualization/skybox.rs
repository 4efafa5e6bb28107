//! Inside-out sky sphere.

use bevy::prelude::*;

const SKY_RADIUS: f32 = 4_000.0;

#[derive(Component)]
pub struct SkySphere;

/// Spawn a large unlit sphere rendered from the inside as the star
/// background.
pub fn spawn_skybox(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    commands.spawn((
        SkySphere,
        Mesh3d(meshes.add(Sphere::new(SKY_RADIUS).mesh().uv(128, 64))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.02, 0.02, 0.04),
            base_color_texture: Some(asset_server.load("universe.jpg")),
            unlit: true,
            cull_mode: None,
            double_sided: true,
            ..default()
        })),
        Transform::default(),
        Name::new("sky"),
    ));
}
