//! Applies hotkey actions to the runtime configuration.

use crate::config::RuntimeConfig;
use pad_proto::{DpadMode, HotkeyAction, SocdMode};

/// Setter bits in ascending order; when several target the same field the
/// later one wins.
const DPAD_SETTERS: [(HotkeyAction, DpadMode); 3] = [
    (HotkeyAction::DPAD_DIGITAL, DpadMode::Digital),
    (HotkeyAction::DPAD_LEFT_ANALOG, DpadMode::LeftAnalog),
    (HotkeyAction::DPAD_RIGHT_ANALOG, DpadMode::RightAnalog),
];

const SOCD_SETTERS: [(HotkeyAction, SocdMode); 3] = [
    (HotkeyAction::SOCD_UP_PRIORITY, SocdMode::UpPriority),
    (HotkeyAction::SOCD_NEUTRAL, SocdMode::Neutral),
    (HotkeyAction::SOCD_LAST_INPUT, SocdMode::SecondInputPriority),
];

/// Return `config` with every bit of `action` applied.
///
/// Dpad and SOCD bits set their mode, invert bits toggle their axis. Button
/// injection bits leave the configuration alone.
#[must_use]
pub fn apply_hotkey(config: RuntimeConfig, action: Option<HotkeyAction>) -> RuntimeConfig {
    let Some(action) = action else {
        return config;
    };

    let mut next = config;

    for (bit, mode) in DPAD_SETTERS {
        if action.contains(bit) {
            next.dpad_mode = mode;
        }
    }
    for (bit, mode) in SOCD_SETTERS {
        if action.contains(bit) {
            next.socd_mode = mode;
        }
    }
    if action.contains(HotkeyAction::INVERT_X_AXIS) {
        next.invert_x = !next.invert_x;
    }
    if action.contains(HotkeyAction::INVERT_Y_AXIS) {
        next.invert_y = !next.invert_y;
    }

    #[cfg(feature = "defmt")]
    if next != config {
        defmt::info!(
            "mode change: dpad={:?} socd={:?} invert_x={} invert_y={}",
            next.dpad_mode,
            next.socd_mode,
            next.invert_x,
            next.invert_y
        );
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_action_is_identity() {
        let config = RuntimeConfig {
            invert_x: true,
            ..RuntimeConfig::DEFAULT
        };
        assert_eq!(apply_hotkey(config, None), config);
        assert_eq!(apply_hotkey(config, Some(HotkeyAction::NONE)), config);
    }

    #[test]
    fn test_sets_dpad_mode() {
        let config = apply_hotkey(
            RuntimeConfig::DEFAULT,
            Some(HotkeyAction::DPAD_RIGHT_ANALOG),
        );
        assert_eq!(config.dpad_mode, DpadMode::RightAnalog);
        let config = apply_hotkey(config, Some(HotkeyAction::DPAD_DIGITAL));
        assert_eq!(config.dpad_mode, DpadMode::Digital);
    }

    #[test]
    fn test_sets_socd_mode() {
        let config = apply_hotkey(
            RuntimeConfig::DEFAULT,
            Some(HotkeyAction::SOCD_LAST_INPUT),
        );
        assert_eq!(config.socd_mode, SocdMode::SecondInputPriority);
        let config = apply_hotkey(config, Some(HotkeyAction::SOCD_UP_PRIORITY));
        assert_eq!(config.socd_mode, SocdMode::UpPriority);
    }

    #[test]
    fn test_invert_toggles() {
        let once = apply_hotkey(RuntimeConfig::DEFAULT, Some(HotkeyAction::INVERT_Y_AXIS));
        assert!(once.invert_y);
        assert!(!once.invert_x);
        let twice = apply_hotkey(once, Some(HotkeyAction::INVERT_Y_AXIS));
        assert_eq!(twice, RuntimeConfig::DEFAULT);
    }

    #[test]
    fn test_combined_bits_apply_independently() {
        let action = HotkeyAction::DPAD_LEFT_ANALOG
            | HotkeyAction::SOCD_NEUTRAL
            | HotkeyAction::INVERT_X_AXIS;
        let start = RuntimeConfig {
            socd_mode: SocdMode::XLeftYUp,
            ..RuntimeConfig::DEFAULT
        };
        let config = apply_hotkey(start, Some(action));
        assert_eq!(config.dpad_mode, DpadMode::LeftAnalog);
        assert_eq!(config.socd_mode, SocdMode::Neutral);
        assert!(config.invert_x);
        assert!(!config.invert_y);
    }

    #[test]
    fn test_highest_setter_bit_wins() {
        let action = HotkeyAction::DPAD_DIGITAL | HotkeyAction::DPAD_RIGHT_ANALOG;
        let config = apply_hotkey(RuntimeConfig::DEFAULT, Some(action));
        assert_eq!(config.dpad_mode, DpadMode::RightAnalog);
    }

    #[test]
    fn test_button_injection_leaves_config() {
        let action = HotkeyAction::HOME_BUTTON | HotkeyAction::CAPTURE_BUTTON;
        assert_eq!(
            apply_hotkey(RuntimeConfig::DEFAULT, Some(action)),
            RuntimeConfig::DEFAULT
        );
    }
}
