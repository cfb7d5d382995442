//! Input value types: Buttons, Dpad, AnalogStick.

/// Implements the set operators for a single-field bitflag newtype.
macro_rules! bitflag_ops {
    ($name:ident, $repr:ty) => {
        impl $name {
            /// Check if all of the given flag(s) are set.
            #[inline]
            #[must_use]
            pub const fn contains(self, other: $name) -> bool {
                (self.0 & other.0) == other.0
            }

            /// Check if any of the given flag(s) are set.
            #[inline]
            #[must_use]
            pub const fn intersects(self, other: $name) -> bool {
                (self.0 & other.0) != 0
            }

            /// Set or clear flag(s).
            #[inline]
            pub fn set(&mut self, other: $name, on: bool) {
                if on {
                    self.0 |= other.0;
                } else {
                    self.0 &= !other.0;
                }
            }

            /// Get the raw bit value.
            #[inline]
            #[must_use]
            pub const fn raw(self) -> $repr {
                self.0
            }

            /// Check if no flag is set.
            #[inline]
            #[must_use]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl core::ops::BitOr for $name {
            type Output = Self;

            #[inline]
            fn bitor(self, rhs: Self) -> Self::Output {
                Self(self.0 | rhs.0)
            }
        }

        impl core::ops::BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;

            #[inline]
            fn bitand(self, rhs: Self) -> Self::Output {
                Self(self.0 & rhs.0)
            }
        }

        impl core::ops::BitAndAssign for $name {
            #[inline]
            fn bitand_assign(&mut self, rhs: Self) {
                self.0 &= rhs.0;
            }
        }

        impl core::ops::Not for $name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self::Output {
                Self(!self.0)
            }
        }
    };
}

pub(crate) use bitflag_ops;

/// Face, shoulder and system buttons as a 16-bit field.
///
/// Directions are not part of this set, see [`Dpad`].
///
/// # Example
///
/// ```
/// use pad_proto::Buttons;
///
/// let f1 = Buttons::BACK | Buttons::START;
/// assert!(f1.contains(Buttons::START));
/// assert!(!f1.contains(Buttons::A));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const LB: Self = Self(1 << 4);
    pub const RB: Self = Self(1 << 5);
    pub const LT: Self = Self(1 << 6); // Digital trigger
    pub const RT: Self = Self(1 << 7); // Digital trigger
    pub const BACK: Self = Self(1 << 8); // Select/Minus
    pub const START: Self = Self(1 << 9); // Start/Plus
    pub const LS: Self = Self(1 << 10);
    pub const RS: Self = Self(1 << 11);
    pub const GUIDE: Self = Self(1 << 12); // Home
    pub const CAPTURE: Self = Self(1 << 13);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Number of defined button bits.
    pub const COUNT: usize = 14;
}

bitflag_ops!(Buttons, u16);

/// Cardinal direction flags.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dpad(pub u8);

impl Dpad {
    pub const UP: Self = Self(1 << 0);
    pub const DOWN: Self = Self(1 << 1);
    pub const LEFT: Self = Self(1 << 2);
    pub const RIGHT: Self = Self(1 << 3);

    pub const NONE: Self = Self(0);

    /// Number of defined direction bits.
    pub const COUNT: usize = 4;

    #[inline]
    #[must_use]
    pub const fn up(self) -> bool {
        self.contains(Self::UP)
    }

    #[inline]
    #[must_use]
    pub const fn down(self) -> bool {
        self.contains(Self::DOWN)
    }

    #[inline]
    #[must_use]
    pub const fn left(self) -> bool {
        self.contains(Self::LEFT)
    }

    #[inline]
    #[must_use]
    pub const fn right(self) -> bool {
        self.contains(Self::RIGHT)
    }

    /// Build a direction set from individual flags.
    #[must_use]
    pub const fn from_flags(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut bits = 0;
        if up {
            bits |= Self::UP.0;
        }
        if down {
            bits |= Self::DOWN.0;
        }
        if left {
            bits |= Self::LEFT.0;
        }
        if right {
            bits |= Self::RIGHT.0;
        }
        Self(bits)
    }
}

bitflag_ops!(Dpad, u8);

/// Lowest stick axis value (up / left).
pub const AXIS_MIN: i16 = i16::MIN;
/// Centered stick axis value.
pub const AXIS_MID: i16 = 0;
/// Highest stick axis value (down / right).
pub const AXIS_MAX: i16 = i16::MAX;

/// Analog stick with X/Y axes.
///
/// Range: [-32768, 32767]. Negative X is left, negative Y is up.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogStick {
    pub x: i16,
    pub y: i16,
}

impl AnalogStick {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub const NEUTRAL: Self = Self {
        x: AXIS_MID,
        y: AXIS_MID,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::A | Buttons::B;
        assert!(buttons.contains(Buttons::A));
        assert!(buttons.contains(Buttons::B));
        assert!(!buttons.contains(Buttons::X));
    }

    #[test]
    fn test_buttons_set_clear() {
        let mut buttons = Buttons::NONE;
        buttons.set(Buttons::GUIDE, true);
        assert!(buttons.contains(Buttons::GUIDE));
        buttons.set(Buttons::GUIDE, false);
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_contains_requires_every_bit() {
        let held = Buttons::BACK;
        assert!(!held.contains(Buttons::BACK | Buttons::START));
        assert!(held.intersects(Buttons::BACK | Buttons::START));
    }

    #[test]
    fn test_dpad_from_flags() {
        let dpad = Dpad::from_flags(true, false, false, true);
        assert!(dpad.up());
        assert!(dpad.right());
        assert!(!dpad.down());
        assert!(!dpad.left());
        assert_eq!(dpad, Dpad::UP | Dpad::RIGHT);
    }

    #[test]
    fn test_dpad_mask_out() {
        let dpad = Dpad::UP | Dpad::LEFT;
        assert_eq!(dpad & !Dpad::LEFT, Dpad::UP);
    }

    #[test]
    fn test_analog_stick_neutral() {
        assert_eq!(AnalogStick::NEUTRAL, AnalogStick::new(0, 0));
        assert_eq!(AnalogStick::default(), AnalogStick::NEUTRAL);
    }
}
