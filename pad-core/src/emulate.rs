//! Dpad-to-analog stick emulation.

use crate::config::RuntimeConfig;
use crate::state::LogicalState;
use pad_proto::{AnalogStick, Dpad, DpadMode, AXIS_MAX, AXIS_MID, AXIS_MIN};

/// Where the cleaned directions end up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpadOutput {
    /// Reported as digital directions.
    Digital(Dpad),
    /// Replaces the left stick.
    LeftStick(AnalogStick),
    /// Replaces the right stick.
    RightStick(AnalogStick),
}

impl DpadOutput {
    /// Write the output into a logical state.
    ///
    /// Analog outputs clear the digital directions.
    pub fn apply(self, state: &mut LogicalState) {
        match self {
            Self::Digital(dpad) => state.dpad = dpad,
            Self::LeftStick(stick) => {
                state.dpad = Dpad::NONE;
                state.left_stick = stick;
            }
            Self::RightStick(stick) => {
                state.dpad = Dpad::NONE;
                state.right_stick = stick;
            }
        }
    }
}

/// Route cleaned directions according to the active dpad mode.
///
/// Inversion only affects the emulated stick; digital output is passed
/// through unchanged.
#[must_use]
pub fn emulate(dpad: Dpad, config: &RuntimeConfig) -> DpadOutput {
    match config.dpad_mode {
        DpadMode::Digital => DpadOutput::Digital(dpad),
        DpadMode::LeftAnalog => {
            DpadOutput::LeftStick(dpad_to_stick(dpad, config.invert_x, config.invert_y))
        }
        DpadMode::RightAnalog => {
            DpadOutput::RightStick(dpad_to_stick(dpad, config.invert_x, config.invert_y))
        }
    }
}

/// Map directions to full-deflection stick coordinates.
///
/// Diagonals put both axes at their extremes; there is no circular clamping.
#[must_use]
pub fn dpad_to_stick(dpad: Dpad, invert_x: bool, invert_y: bool) -> AnalogStick {
    AnalogStick::new(
        axis_value(dpad.left(), dpad.right(), invert_x),
        axis_value(dpad.up(), dpad.down(), invert_y),
    )
}

#[inline]
fn axis_value(low: bool, high: bool, invert: bool) -> i16 {
    let (low, high) = if invert { (high, low) } else { (low, high) };
    match (low, high) {
        (true, false) => AXIS_MIN,
        (false, true) => AXIS_MAX,
        _ => AXIS_MID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_mode(dpad_mode: DpadMode) -> RuntimeConfig {
        RuntimeConfig {
            dpad_mode,
            ..RuntimeConfig::DEFAULT
        }
    }

    #[test]
    fn test_digital_passthrough() {
        let config = RuntimeConfig {
            invert_x: true,
            invert_y: true,
            ..RuntimeConfig::DEFAULT
        };
        assert_eq!(
            emulate(Dpad::UP | Dpad::LEFT, &config),
            DpadOutput::Digital(Dpad::UP | Dpad::LEFT)
        );
    }

    #[test]
    fn test_up_left_diagonal() {
        assert_eq!(
            emulate(Dpad::UP | Dpad::LEFT, &with_mode(DpadMode::LeftAnalog)),
            DpadOutput::LeftStick(AnalogStick::new(AXIS_MIN, AXIS_MIN))
        );
    }

    #[test]
    fn test_released_is_midpoint() {
        assert_eq!(
            emulate(Dpad::NONE, &with_mode(DpadMode::LeftAnalog)),
            DpadOutput::LeftStick(AnalogStick::NEUTRAL)
        );
    }

    #[test]
    fn test_cardinals() {
        assert_eq!(
            dpad_to_stick(Dpad::DOWN, false, false),
            AnalogStick::new(AXIS_MID, AXIS_MAX)
        );
        assert_eq!(
            dpad_to_stick(Dpad::RIGHT, false, false),
            AnalogStick::new(AXIS_MAX, AXIS_MID)
        );
    }

    #[test]
    fn test_opposing_pair_is_midpoint() {
        assert_eq!(
            dpad_to_stick(Dpad::LEFT | Dpad::RIGHT | Dpad::UP, false, false),
            AnalogStick::new(AXIS_MID, AXIS_MIN)
        );
    }

    #[test]
    fn test_inversion() {
        assert_eq!(
            dpad_to_stick(Dpad::UP | Dpad::LEFT, true, false),
            AnalogStick::new(AXIS_MAX, AXIS_MIN)
        );
        assert_eq!(
            dpad_to_stick(Dpad::UP | Dpad::LEFT, false, true),
            AnalogStick::new(AXIS_MIN, AXIS_MAX)
        );
        assert_eq!(dpad_to_stick(Dpad::NONE, true, true), AnalogStick::NEUTRAL);
    }

    #[test]
    fn test_apply_right_stick() {
        let mut state = LogicalState::neutral(&RuntimeConfig::DEFAULT);
        state.dpad = Dpad::DOWN;
        state.left_stick = AnalogStick::new(100, 200);

        let output = emulate(Dpad::DOWN, &with_mode(DpadMode::RightAnalog));
        output.apply(&mut state);

        assert!(state.dpad.is_empty());
        assert_eq!(state.left_stick, AnalogStick::new(100, 200));
        assert_eq!(state.right_stick, AnalogStick::new(AXIS_MID, AXIS_MAX));
    }

    #[test]
    fn test_apply_digital_keeps_sticks() {
        let mut state = LogicalState::neutral(&RuntimeConfig::DEFAULT);
        state.left_stick = AnalogStick::new(-7, 7);
        DpadOutput::Digital(Dpad::LEFT).apply(&mut state);
        assert_eq!(state.dpad, Dpad::LEFT);
        assert_eq!(state.left_stick, AnalogStick::new(-7, 7));
    }
}
