use std::path::Path;

use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod config;
mod locomotion;
mod orbital;
mod ui;
mod visualization;

use locomotion::{LocomotionConfig, LocomotionPlugin, MainCamera, Rig};
use locomotion::rig::LOBBY_POSITION;
use orbital::bodies::{BODIES, BodyRegistry};
use orbital::{OrbitalPlugin, ScaleModel};
use ui::UiPlugin;
use visualization::VisualizationPlugin;

/// Frame-loop ordering: clock first, then orbit integration, then input
/// sampling and session edges, then rig movement.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Clock,
    Orbits,
    Input,
    Locomotion,
}

/// Spawn the player rig with the camera attached to it. The orbit controls
/// drive the camera while no VR session is active; the rig itself only moves
/// under locomotion.
fn setup(mut commands: Commands) {
    let camera = commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                near: 0.1,
                far: 10_000.0,
                ..default()
            }),
            Camera {
                clear_color: ClearColorConfig::Custom(Color::BLACK),
                ..default()
            },
            PanOrbitCamera {
                focus: Vec3::ZERO,
                radius: Some(150.0),
                yaw: Some(0.0),
                pitch: Some(0.3),
                force_update: true,
                ..default()
            },
            MainCamera,
            Transform::from_xyz(0.0, 45.0, 150.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    let rig = commands
        .spawn((
            Rig::default(),
            Transform::from_translation(LOBBY_POSITION),
            Visibility::default(),
            Name::new("rig"),
        ))
        .id();
    commands.entity(rig).add_child(camera);
}

fn main() -> anyhow::Result<()> {
    let config = config::load_or_default(Path::new("solar_system.json"))?;
    let scale = ScaleModel::from_config(&config)?;
    let registry = BodyRegistry::build(BODIES, &scale)?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Solar System VR".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.insert_resource(LocomotionConfig::from(&config));
    app.insert_resource(config);
    app.insert_resource(registry);

    app.configure_sets(
        Update,
        (
            SimSet::Clock,
            SimSet::Orbits,
            SimSet::Input,
            SimSet::Locomotion,
        )
            .chain(),
    );

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(LocomotionPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(UiPlugin);
    app.add_systems(Startup, setup);

    app.run();
    Ok(())
}
