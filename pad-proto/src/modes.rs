//! Runtime mode enums, the SOCD rule table and hotkey action flags.
//!
//! Every enum here has a stable numeric code. The codes are what the options
//! record stores, so they must never be renumbered.

use crate::types::bitflag_ops;

/// Report flavor the embedding firmware encodes the logical state into.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InputMode {
    #[default]
    XInput = 0,
    Switch = 1,
    Hid = 2,
    /// Web/serial configuration mode, never encoded as a gamepad report.
    Config = 255,
}

impl InputMode {
    /// Decode a stored mode code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::XInput),
            1 => Some(Self::Switch),
            2 => Some(Self::Hid),
            255 => Some(Self::Config),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Whether the cleaned directions stay digital or drive an analog stick.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DpadMode {
    #[default]
    Digital = 0,
    LeftAnalog = 1,
    RightAnalog = 2,
}

impl DpadMode {
    /// Decode a stored mode code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Digital),
            1 => Some(Self::LeftAnalog),
            2 => Some(Self::RightAnalog),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// How one axis resolves both of its opposing directions being held.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocdRule {
    /// Report neither direction.
    #[default]
    Neutral,
    /// Up on the vertical axis, left on the horizontal axis.
    UpLeft,
    /// Down on the vertical axis, right on the horizontal axis.
    DownRight,
    /// The most recently pressed direction.
    LastInput,
    /// The direction held longest.
    FirstInput,
}

impl SocdRule {
    /// Whether the rule needs press-order history.
    #[inline]
    #[must_use]
    pub const fn uses_history(self) -> bool {
        matches!(self, Self::LastInput | Self::FirstInput)
    }
}

/// Independent rules for the horizontal and vertical axes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SocdRules {
    pub horizontal: SocdRule,
    pub vertical: SocdRule,
}

impl SocdRules {
    #[must_use]
    pub const fn new(horizontal: SocdRule, vertical: SocdRule) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const NEUTRAL: Self = Self::new(SocdRule::Neutral, SocdRule::Neutral);
}

/// Named SOCD cleaning policies.
///
/// The first three are legacy names kept for stored configurations; each is an
/// alias of a comprehensive `X*Y*` policy with the same rules. The comprehensive
/// policies cover the full horizontal × vertical rule grid.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SocdMode {
    /// U+D=U, L+R=N
    UpPriority = 0,
    /// U+D=N, L+R=N
    #[default]
    Neutral = 1,
    /// U+D=LIP, L+R=LIP
    SecondInputPriority = 2,
    XNeutralYNeutral = 3,
    XNeutralYDown = 4,
    XNeutralYUp = 5,
    XNeutralYLastInput = 6,
    XNeutralYFirstInput = 7,
    XLeftYNeutral = 8,
    XLeftYDown = 9,
    XLeftYUp = 10,
    XLeftYLastInput = 11,
    XLeftYFirstInput = 12,
    XRightYNeutral = 13,
    XRightYDown = 14,
    XRightYUp = 15,
    XRightYLastInput = 16,
    XRightYFirstInput = 17,
    XLastInputYNeutral = 18,
    XLastInputYDown = 19,
    XLastInputYUp = 20,
    XLastInputYLastInput = 21,
    XLastInputYFirstInput = 22,
    XFirstInputYNeutral = 23,
    XFirstInputYDown = 24,
    XFirstInputYUp = 25,
    XFirstInputYLastInput = 26,
    XFirstInputYFirstInput = 27,
}

/// Column order of the comprehensive grid, horizontal axis.
const GRID_X: [SocdRule; 5] = [
    SocdRule::Neutral,
    SocdRule::UpLeft,
    SocdRule::DownRight,
    SocdRule::LastInput,
    SocdRule::FirstInput,
];

/// Row order of the comprehensive grid, vertical axis. Down precedes up.
const GRID_Y: [SocdRule; 5] = [
    SocdRule::Neutral,
    SocdRule::DownRight,
    SocdRule::UpLeft,
    SocdRule::LastInput,
    SocdRule::FirstInput,
];

const LEGACY_COUNT: usize = 3;

/// Rule pair of every policy, indexed by its code.
const SOCD_RULES: [SocdRules; SocdMode::COUNT] = {
    let mut table = [SocdRules::NEUTRAL; SocdMode::COUNT];
    table[SocdMode::UpPriority as usize] = SocdRules::new(SocdRule::Neutral, SocdRule::UpLeft);
    table[SocdMode::Neutral as usize] = SocdRules::NEUTRAL;
    table[SocdMode::SecondInputPriority as usize] =
        SocdRules::new(SocdRule::LastInput, SocdRule::LastInput);

    let mut i = 0;
    while i < GRID_X.len() * GRID_Y.len() {
        table[LEGACY_COUNT + i] = SocdRules::new(GRID_X[i / GRID_Y.len()], GRID_Y[i % GRID_Y.len()]);
        i += 1;
    }
    table
};

const fn grid_slot(grid: &[SocdRule; 5], rule: SocdRule) -> usize {
    let mut i = 0;
    while i < grid.len() {
        if grid[i] as u8 == rule as u8 {
            return i;
        }
        i += 1;
    }
    0
}

impl SocdMode {
    /// Number of policies.
    pub const COUNT: usize = 28;

    /// Every policy in code order.
    pub const ALL: [SocdMode; Self::COUNT] = [
        Self::UpPriority,
        Self::Neutral,
        Self::SecondInputPriority,
        Self::XNeutralYNeutral,
        Self::XNeutralYDown,
        Self::XNeutralYUp,
        Self::XNeutralYLastInput,
        Self::XNeutralYFirstInput,
        Self::XLeftYNeutral,
        Self::XLeftYDown,
        Self::XLeftYUp,
        Self::XLeftYLastInput,
        Self::XLeftYFirstInput,
        Self::XRightYNeutral,
        Self::XRightYDown,
        Self::XRightYUp,
        Self::XRightYLastInput,
        Self::XRightYFirstInput,
        Self::XLastInputYNeutral,
        Self::XLastInputYDown,
        Self::XLastInputYUp,
        Self::XLastInputYLastInput,
        Self::XLastInputYFirstInput,
        Self::XFirstInputYNeutral,
        Self::XFirstInputYDown,
        Self::XFirstInputYUp,
        Self::XFirstInputYLastInput,
        Self::XFirstInputYFirstInput,
    ];

    /// Decode a stored policy code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < Self::COUNT {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The per-axis rules this policy applies.
    #[inline]
    #[must_use]
    pub const fn rules(self) -> SocdRules {
        SOCD_RULES[self as usize]
    }

    /// The comprehensive policy for a rule pair.
    ///
    /// Never returns a legacy alias.
    #[must_use]
    pub const fn from_rules(rules: SocdRules) -> Self {
        let x = grid_slot(&GRID_X, rules.horizontal);
        let y = grid_slot(&GRID_Y, rules.vertical);
        Self::ALL[LEGACY_COUNT + x * GRID_Y.len() + y]
    }

    /// Whether this is one of the legacy names.
    #[inline]
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        (self as usize) < LEGACY_COUNT
    }

    /// Map a legacy name onto its comprehensive equivalent.
    #[inline]
    #[must_use]
    pub const fn canonical(self) -> Self {
        Self::from_rules(self.rules())
    }
}

/// Effects a hotkey chord can trigger. Several may be bound to one chord.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HotkeyAction(pub u16);

impl HotkeyAction {
    pub const NONE: Self = Self(0);
    pub const DPAD_DIGITAL: Self = Self(1 << 0);
    pub const DPAD_LEFT_ANALOG: Self = Self(1 << 1);
    pub const DPAD_RIGHT_ANALOG: Self = Self(1 << 2);
    pub const HOME_BUTTON: Self = Self(1 << 3);
    pub const CAPTURE_BUTTON: Self = Self(1 << 4);
    pub const SOCD_UP_PRIORITY: Self = Self(1 << 5);
    pub const SOCD_NEUTRAL: Self = Self(1 << 6);
    pub const SOCD_LAST_INPUT: Self = Self(1 << 7);
    pub const INVERT_X_AXIS: Self = Self(1 << 8);
    pub const INVERT_Y_AXIS: Self = Self(1 << 9);

    /// Bits that inject a button instead of changing configuration.
    pub const BUTTON_INJECTION: Self = Self(Self::HOME_BUTTON.0 | Self::CAPTURE_BUTTON.0);
}

bitflag_ops!(HotkeyAction, u16);
