//! Analog-stick locomotion.
//!
//! Turns per-frame controller state into a rig displacement and optional
//! snap turns. The math is independent of the engine: the caller hands in
//! the camera's horizontal forward direction and the frame delta, and gets
//! back what to apply to the rig.

use bevy::prelude::*;

use crate::config::SolarSystemConfig;
use crate::locomotion::input::InputSourceState;

/// Axis index used for snap turning (left stick X).
const TURN_AXIS: usize = 0;

/// Candidate stick pairs in priority order: right stick first, left as the
/// fallback.
const STICK_PAIRS: [(usize, usize); 2] = [(2, 3), (0, 1)];

#[derive(Resource, Clone, Debug)]
pub struct LocomotionConfig {
    /// Scene units per second of held full deflection.
    pub move_speed: f32,
    pub deadzone: f32,
    pub turn_threshold: f32,
    /// Radians per snap turn.
    pub turn_angle: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 60.0,
            deadzone: 0.1,
            turn_threshold: 0.5,
            turn_angle: std::f32::consts::FRAC_PI_6,
        }
    }
}

impl From<&SolarSystemConfig> for LocomotionConfig {
    fn from(config: &SolarSystemConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            deadzone: config.deadzone,
            turn_threshold: config.turn_threshold,
            turn_angle: config.turn_angle,
        }
    }
}

/// What one frame of input asks the rig to do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigDelta {
    pub translation: Vec3,
    /// Radians; negative turns clockwise when viewed from above.
    pub yaw: f32,
}

/// Locomotion state carried across frames.
#[derive(Resource, Debug, Default)]
pub struct Locomotion {
    turn_debounce_active: bool,
}

impl Locomotion {
    /// Compute the rig delta for one frame. `camera_forward_xz` is the
    /// camera's world forward projected onto the ground plane (it need not
    /// be normalized); `delta_seconds` is the unscaled frame delta, which
    /// makes the traversal speed frame-rate independent.
    ///
    /// Sources that are absent, disconnected, or missing the axes a rule
    /// needs simply contribute nothing.
    pub fn update(
        &mut self,
        config: &LocomotionConfig,
        slots: &[Option<InputSourceState>],
        camera_forward_xz: Vec3,
        delta_seconds: f32,
    ) -> RigDelta {
        let mut delta = RigDelta::default();

        let forward = Vec3::new(camera_forward_xz.x, 0.0, camera_forward_xz.z).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let mut turn_deflection = 0.0f32;

        for source in slots.iter().flatten() {
            if !source.connected {
                continue;
            }

            if let Some((strafe, stick_y)) = select_stick(&source.axes, config.deadzone) {
                let ahead = -stick_y;
                delta.translation += forward * (ahead * config.move_speed * delta_seconds)
                    + right * (strafe * config.move_speed * delta_seconds);
            }

            let turn_value = source.axes.get(TURN_AXIS).copied().unwrap_or(0.0);
            if turn_value.abs() > turn_deflection.abs() {
                turn_deflection = turn_value;
            }
        }

        if turn_deflection.abs() > config.turn_threshold {
            if !self.turn_debounce_active {
                delta.yaw = -config.turn_angle * turn_deflection.signum();
                self.turn_debounce_active = true;
            }
        } else {
            self.turn_debounce_active = false;
        }

        delta
    }
}

/// Pick the first candidate pair with either axis beyond the deadzone. A
/// pair whose indices fall outside the axis array is not a candidate.
fn select_stick(axes: &[f32], deadzone: f32) -> Option<(f32, f32)> {
    for (x_index, y_index) in STICK_PAIRS {
        let (Some(&x), Some(&y)) = (axes.get(x_index), axes.get(y_index)) else {
            continue;
        };
        if x.abs() > deadzone || y.abs() > deadzone {
            return Some((x, y));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: Vec3 = Vec3::NEG_Z;

    fn source(axes: &[f32]) -> Option<InputSourceState> {
        Some(InputSourceState {
            connected: true,
            axes: axes.to_vec(),
        })
    }

    fn config() -> LocomotionConfig {
        LocomotionConfig::default()
    }

    #[test]
    fn test_deadzone_boundary() {
        let mut locomotion = Locomotion::default();
        let epsilon = 1e-4;

        let below = [0.0, 0.1 - epsilon, 0.0, 0.0];
        let delta = locomotion.update(&config(), &[source(&below)], FORWARD, 1.0 / 60.0);
        assert_eq!(delta.translation, Vec3::ZERO);

        let above = [0.0, 0.1 + epsilon, 0.0, 0.0];
        let delta = locomotion.update(&config(), &[source(&above)], FORWARD, 1.0 / 60.0);
        assert!(delta.translation.length() > 0.0);
    }

    #[test]
    fn test_push_up_moves_ahead() {
        let mut locomotion = Locomotion::default();
        // stick up arrives as negative Y
        let delta = locomotion.update(
            &config(),
            &[source(&[0.0, 0.0, 0.0, -1.0])],
            FORWARD,
            1.0 / 60.0,
        );
        assert!(delta.translation.z < 0.0);
        assert!(delta.translation.x.abs() < 1e-6);
    }

    #[test]
    fn test_right_stick_takes_priority_over_left() {
        let mut locomotion = Locomotion::default();
        // left pushes ahead, right strafes; only the strafe must land
        let delta = locomotion.update(
            &config(),
            &[source(&[0.0, -1.0, 1.0, 0.0])],
            FORWARD,
            1.0 / 60.0,
        );
        assert!(delta.translation.x > 0.0);
        assert!(delta.translation.z.abs() < 1e-6);
    }

    #[test]
    fn test_left_stick_is_the_fallback() {
        let mut locomotion = Locomotion::default();
        let delta = locomotion.update(
            &config(),
            &[source(&[0.4, 0.0, 0.0, 0.0])],
            FORWARD,
            1.0 / 60.0,
        );
        assert!(delta.translation.x > 0.0);
    }

    #[test]
    fn test_displacement_scales_linearly_with_delta() {
        let axes = [0.0, 0.0, 0.0, -0.8];
        let mut a = Locomotion::default();
        let mut b = Locomotion::default();
        let small = a.update(&config(), &[source(&axes)], FORWARD, 1.0 / 120.0);
        let large = b.update(&config(), &[source(&axes)], FORWARD, 1.0 / 60.0);
        assert!((large.translation.length() - 2.0 * small.translation.length()).abs() < 1e-6);
    }

    #[test]
    fn test_snap_turn_fires_once_per_deflection() {
        let mut locomotion = Locomotion::default();
        let held = [0.9, 0.0, 0.0, 0.0];

        let mut turns = 0;
        for _ in 0..10 {
            let delta = locomotion.update(&config(), &[source(&held)], FORWARD, 1.0 / 60.0);
            if delta.yaw != 0.0 {
                turns += 1;
                assert!((delta.yaw + std::f32::consts::FRAC_PI_6).abs() < 1e-6);
            }
        }
        assert_eq!(turns, 1);

        // releasing re-arms the debounce
        locomotion.update(&config(), &[source(&[0.0; 4])], FORWARD, 1.0 / 60.0);
        let delta = locomotion.update(&config(), &[source(&held)], FORWARD, 1.0 / 60.0);
        assert!(delta.yaw != 0.0);
    }

    #[test]
    fn test_turn_direction_follows_deflection_sign() {
        let mut locomotion = Locomotion::default();
        let delta = locomotion.update(
            &config(),
            &[source(&[-0.9, 0.0, 0.0, 0.0])],
            FORWARD,
            1.0 / 60.0,
        );
        assert!(delta.yaw > 0.0);
    }

    #[test]
    fn test_malformed_sources_contribute_nothing() {
        let mut locomotion = Locomotion::default();
        let disconnected = Some(InputSourceState {
            connected: false,
            axes: vec![1.0, 1.0, 1.0, 1.0],
        });
        let short = source(&[0.9]);
        let empty = source(&[]);
        let delta = locomotion.update(
            &config(),
            &[disconnected, short.clone(), empty, None],
            FORWARD,
            1.0 / 60.0,
        );
        assert_eq!(delta.translation, Vec3::ZERO);
        // a one-axis source still exposes the turn axis
        assert!(delta.yaw != 0.0);
    }

    #[test]
    fn test_both_sticks_inside_deadzone_means_no_movement() {
        let mut locomotion = Locomotion::default();
        let delta = locomotion.update(
            &config(),
            &[source(&[0.04, -0.03, 0.02, 0.05])],
            FORWARD,
            1.0 / 60.0,
        );
        assert_eq!(delta, RigDelta::default());
    }

    #[test]
    fn test_vertical_camera_produces_no_translation() {
        let mut locomotion = Locomotion::default();
        let delta = locomotion.update(
            &config(),
            &[source(&[0.0, 0.0, 0.0, -1.0])],
            Vec3::NEG_Y,
            1.0 / 60.0,
        );
        assert_eq!(delta.translation, Vec3::ZERO);
    }
}
