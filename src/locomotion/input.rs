//! Controller slot registry.
//!
//! VR controllers connect and disconnect asynchronously; instead of tracking
//! them through connection callbacks, the registry is rebuilt from the
//! engine's connected gamepad entities every frame and read synchronously by
//! the locomotion pass. Axis layout per source is `[left_x, left_y,
//! right_x, right_y]` with stick-up mapping to negative Y.

use bevy::prelude::*;

/// One slot per hand.
pub const CONTROLLER_SLOTS: usize = 2;

/// Snapshot of one controller's analog state for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSourceState {
    pub connected: bool,
    /// Up to four ordered axis values in `[-1, 1]`.
    pub axes: Vec<f32>,
}

/// Maps controller slots to the source connected there, if any.
#[derive(Resource, Debug, Default)]
pub struct ControllerRegistry {
    slots: [Option<InputSourceState>; CONTROLLER_SLOTS],
}

impl ControllerRegistry {
    pub fn slots(&self) -> &[Option<InputSourceState>] {
        &self.slots
    }

    pub fn set_slot(&mut self, slot: usize, source: Option<InputSourceState>) {
        if let Some(cell) = self.slots.get_mut(slot) {
            *cell = source;
        }
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

/// Rebuild the registry from whatever gamepads the engine currently sees.
pub fn sync_controller_registry(
    gamepads: Query<&Gamepad>,
    mut registry: ResMut<ControllerRegistry>,
) {
    registry.clear();
    for (slot, gamepad) in gamepads.iter().take(CONTROLLER_SLOTS).enumerate() {
        // Stick-up is +1 on the engine side; the locomotion convention wants
        // it negative.
        let axes = vec![
            gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
            -gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
            gamepad.get(GamepadAxis::RightStickX).unwrap_or(0.0),
            -gamepad.get(GamepadAxis::RightStickY).unwrap_or(0.0),
        ];
        registry.set_slot(
            slot,
            Some(InputSourceState {
                connected: true,
                axes,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = ControllerRegistry::default();
        assert!(registry.slots().iter().all(|slot| slot.is_none()));
    }

    #[test]
    fn test_out_of_range_slot_is_ignored() {
        let mut registry = ControllerRegistry::default();
        registry.set_slot(
            CONTROLLER_SLOTS + 3,
            Some(InputSourceState {
                connected: true,
                axes: vec![0.0; 4],
            }),
        );
        assert!(registry.slots().iter().all(|slot| slot.is_none()));
    }

    #[test]
    fn test_clear_disconnects_everything() {
        let mut registry = ControllerRegistry::default();
        registry.set_slot(
            0,
            Some(InputSourceState {
                connected: true,
                axes: vec![0.1, 0.2, 0.3, 0.4],
            }),
        );
        registry.clear();
        assert!(registry.slots()[0].is_none());
    }
}
