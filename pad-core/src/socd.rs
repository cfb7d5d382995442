//! SOCD (simultaneous opposite cardinal direction) cleaning.
//!
//! Every [`SocdMode`] maps to a pair of per-axis [`SocdRule`]s, so the
//! resolver only ever deals with one axis at a time: a "low" direction
//! (up / left) and a "high" direction (down / right).
//!
//! Press order for the history-based rules is tracked every cycle regardless
//! of the active mode, so switching to a last/first-input policy while a
//! direction is held behaves as if the policy had been active all along.

use pad_proto::{Dpad, SocdMode, SocdRule};

/// Which side of an axis a history entry refers to.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    None,
    /// Up on the vertical axis, left on the horizontal axis.
    UpLeft,
    /// Down on the vertical axis, right on the horizontal axis.
    DownRight,
}

impl Direction {
    #[inline]
    const fn flags(self) -> (bool, bool) {
        match self {
            Self::None => (false, false),
            Self::UpLeft => (true, false),
            Self::DownRight => (false, true),
        }
    }
}

/// Press-order memory for one axis.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisHistory {
    last: Direction,
    first: Direction,
    held_low: bool,
    held_high: bool,
}

impl AxisHistory {
    pub const NONE: Self = Self {
        last: Direction::None,
        first: Direction::None,
        held_low: false,
        held_high: false,
    };

    /// Direction pressed most recently, or `None` when the order is unknown.
    #[inline]
    #[must_use]
    pub const fn last(&self) -> Direction {
        self.last
    }

    /// Direction held since before the other one was pressed.
    #[inline]
    #[must_use]
    pub const fn first(&self) -> Direction {
        self.first
    }

    fn track(&mut self, low: bool, high: bool) {
        let low_pressed = low && !self.held_low;
        let high_pressed = high && !self.held_high;

        match (low, high) {
            (false, false) => {
                self.last = Direction::None;
                self.first = Direction::None;
            }
            (true, false) => {
                self.first = Direction::UpLeft;
                if low_pressed {
                    self.last = Direction::UpLeft;
                }
            }
            (false, true) => {
                self.first = Direction::DownRight;
                if high_pressed {
                    self.last = Direction::DownRight;
                }
            }
            // Both pressed in the same cycle: no order to go by
            (true, true) => match (low_pressed, high_pressed) {
                (true, true) => {
                    self.last = Direction::None;
                    self.first = Direction::None;
                }
                (true, false) => self.last = Direction::UpLeft,
                (false, true) => self.last = Direction::DownRight,
                (false, false) => {}
            },
        }

        self.held_low = low;
        self.held_high = high;
    }

    fn resolve(&self, rule: SocdRule, low: bool, high: bool) -> (bool, bool) {
        if !(low && high) {
            return (low, high);
        }
        match rule {
            SocdRule::Neutral => (false, false),
            SocdRule::UpLeft => (true, false),
            SocdRule::DownRight => (false, true),
            SocdRule::LastInput => self.last.flags(),
            SocdRule::FirstInput => self.first.flags(),
        }
    }
}

/// Press-order memory for both axes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectionHistory {
    pub horizontal: AxisHistory,
    pub vertical: AxisHistory,
}

/// Rewrites opposing direction pairs according to the active policy.
#[derive(Clone, Copy, Default, Debug)]
pub struct SocdResolver {
    history: DirectionHistory,
}

impl SocdResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: DirectionHistory {
                horizontal: AxisHistory::NONE,
                vertical: AxisHistory::NONE,
            },
        }
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &DirectionHistory {
        &self.history
    }

    /// Clean one cycle's directions.
    ///
    /// The result never holds both directions of an axis.
    pub fn resolve(&mut self, dpad: Dpad, mode: SocdMode) -> Dpad {
        let rules = mode.rules();

        self.history.vertical.track(dpad.up(), dpad.down());
        self.history.horizontal.track(dpad.left(), dpad.right());

        let (up, down) = self
            .history
            .vertical
            .resolve(rules.vertical, dpad.up(), dpad.down());
        let (left, right) = self
            .history
            .horizontal
            .resolve(rules.horizontal, dpad.left(), dpad.right());

        Dpad::from_flags(up, down, left, right)
    }
}
