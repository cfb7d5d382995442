//! Per-cycle input samples and the normalized logical state.

use crate::config::RuntimeConfig;
use pad_proto::{AnalogStick, Buttons, Dpad, DpadMode, InputMode, SocdMode};

/// One snapshot of every physical input.
///
/// Produced once per cycle by the read capability and consumed by that cycle
/// only.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    pub buttons: Buttons,
    pub dpad: Dpad,
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
    pub left_trigger: u8,
    pub right_trigger: u8,
}

impl InputSample {
    /// Nothing pressed, sticks centered, triggers released.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            dpad: Dpad::NONE,
            left_stick: AnalogStick::NEUTRAL,
            right_stick: AnalogStick::NEUTRAL,
            left_trigger: 0,
            right_trigger: 0,
        }
    }
}

/// Sample as read from the hardware.
pub type RawInputSample = InputSample;

/// Sample after the debouncer. Analog values are carried through unchanged.
pub type DebouncedInputSample = InputSample;

/// Normalized output of one pipeline cycle, consumed by the report encoder.
///
/// In an analog dpad mode `dpad` is always empty and the emulated
/// coordinates replace the corresponding stick.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicalState {
    pub buttons: Buttons,
    pub dpad: Dpad,
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub input_mode: InputMode,
    pub dpad_mode: DpadMode,
    pub socd_mode: SocdMode,
}

impl LogicalState {
    /// A released controller reporting the given configuration.
    #[must_use]
    pub const fn neutral(config: &RuntimeConfig) -> Self {
        Self {
            buttons: Buttons::NONE,
            dpad: Dpad::NONE,
            left_stick: AnalogStick::NEUTRAL,
            right_stick: AnalogStick::NEUTRAL,
            left_trigger: 0,
            right_trigger: 0,
            input_mode: config.input_mode,
            dpad_mode: config.dpad_mode,
            socd_mode: config.socd_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_sample() {
        assert_eq!(InputSample::neutral(), InputSample::default());
    }

    #[test]
    fn test_neutral_state_keeps_modes() {
        let config = RuntimeConfig {
            dpad_mode: DpadMode::RightAnalog,
            socd_mode: SocdMode::XLeftYUp,
            ..RuntimeConfig::DEFAULT
        };
        let state = LogicalState::neutral(&config);
        assert!(state.buttons.is_empty());
        assert!(state.dpad.is_empty());
        assert_eq!(state.dpad_mode, DpadMode::RightAnalog);
        assert_eq!(state.socd_mode, SocdMode::XLeftYUp);
    }
}
