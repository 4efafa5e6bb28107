//! Keyboard channels and the status line.
//!
//! Key bindings:
//! - `[` / `]`  halve / double the time scale
//! - `0`        reset the time scale to 1x
//! - up / down  ramp the time scale continuously while held
//! - `V`        enter / leave the VR session

use bevy::prelude::*;
use chrono::SecondsFormat;

use crate::locomotion::VrSession;
use crate::orbital::SimulationClock;

/// Multiplicative ramp per held second on the continuous channel.
const SCALE_RAMP_PER_SECOND: f32 = 4.0;

#[derive(Component)]
pub struct StatusText;

pub fn spawn_status_text(mut commands: Commands) {
    commands.spawn((
        StatusText,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.6, 0.9, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

/// Discrete and continuous time-scale channels. Both write the same clock
/// cell; the last writer in a frame wins.
pub fn handle_time_scale_keys(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Real>>,
    mut clock: ResMut<SimulationClock>,
) {
    if keys.just_pressed(KeyCode::BracketLeft) {
        clock.halve_scale();
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        clock.double_scale();
    }
    if keys.just_pressed(KeyCode::Digit0) {
        clock.reset_scale();
    }

    let ramp = SCALE_RAMP_PER_SECOND.powf(time.delta_secs());
    if keys.pressed(KeyCode::ArrowUp) {
        let target = clock.time_scale() * ramp;
        clock.set_scale(target);
    }
    if keys.pressed(KeyCode::ArrowDown) {
        let target = clock.time_scale() / ramp;
        clock.set_scale(target);
    }
}

/// Session toggle stand-in for the XR session button.
pub fn handle_session_toggle(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<VrSession>) {
    if keys.just_pressed(KeyCode::KeyV) {
        session.requested = !session.requested;
    }
}

pub fn update_status_text(
    clock: Res<SimulationClock>,
    session: Res<VrSession>,
    mut texts: Query<&mut Text, With<StatusText>>,
) {
    for mut text in texts.iter_mut() {
        text.0 = format!(
            "{}  |  time x{:.2}  |  {}",
            clock
                .current_utc
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            clock.time_scale(),
            if session.active { "VR" } else { "desktop" },
        );
    }
}
