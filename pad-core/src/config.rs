//! Runtime configuration and the hotkey table.

use pad_proto::{Buttons, Dpad, DpadMode, GamepadOptions, HotkeyAction, InputMode, SocdMode};

/// Mode fields read every cycle and changed only by hotkey actions.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeConfig {
    pub input_mode: InputMode,
    pub dpad_mode: DpadMode,
    pub socd_mode: SocdMode,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl RuntimeConfig {
    pub const DEFAULT: Self = Self::from_options(&GamepadOptions::DEFAULT);

    /// Take the runtime modes out of a stored options record.
    #[must_use]
    pub const fn from_options(options: &GamepadOptions) -> Self {
        Self {
            input_mode: options.input_mode,
            dpad_mode: options.dpad_mode,
            socd_mode: options.socd_mode,
            invert_x: options.invert_x,
            invert_y: options.invert_y,
        }
    }

    /// Build the record to persist.
    #[must_use]
    pub const fn to_options(&self, debounce_ms: u16) -> GamepadOptions {
        GamepadOptions {
            input_mode: self.input_mode,
            dpad_mode: self.dpad_mode,
            socd_mode: self.socd_mode,
            invert_x: self.invert_x,
            invert_y: self.invert_y,
            debounce_ms,
        }
    }
}

/// A chord of buttons and directions bound to an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hotkey {
    pub buttons: Buttons,
    pub dpad: Dpad,
    pub action: HotkeyAction,
}

impl Hotkey {
    #[must_use]
    pub const fn new(buttons: Buttons, dpad: Dpad, action: HotkeyAction) -> Self {
        Self {
            buttons,
            dpad,
            action,
        }
    }

    /// Whether every button and direction of the chord is held.
    ///
    /// An empty chord is never satisfied.
    #[inline]
    #[must_use]
    pub fn is_satisfied(&self, buttons: Buttons, dpad: Dpad) -> bool {
        !(self.buttons.is_empty() && self.dpad.is_empty())
            && buttons.contains(self.buttons)
            && dpad.contains(self.dpad)
    }
}

/// Maximum number of hotkeys in a table.
pub const MAX_HOTKEYS: usize = 16;

/// Hotkeys in priority order: earlier entries win.
pub type HotkeyTable = heapless::Vec<Hotkey, MAX_HOTKEYS>;

/// Function button 1 (Back + Start): dpad mode chords.
pub const HOTKEY_F1: Buttons = Buttons(Buttons::BACK.0 | Buttons::START.0);

/// Function button 2 (both stick clicks): SOCD and inversion chords.
pub const HOTKEY_F2: Buttons = Buttons(Buttons::LS.0 | Buttons::RS.0);

/// Factory hotkey bindings.
pub const DEFAULT_HOTKEYS: [Hotkey; 8] = [
    Hotkey::new(HOTKEY_F1, Dpad::DOWN, HotkeyAction::DPAD_DIGITAL),
    Hotkey::new(HOTKEY_F1, Dpad::UP, HotkeyAction::DPAD_LEFT_ANALOG),
    Hotkey::new(HOTKEY_F1, Dpad::RIGHT, HotkeyAction::DPAD_RIGHT_ANALOG),
    Hotkey::new(HOTKEY_F1, Dpad::LEFT, HotkeyAction::HOME_BUTTON),
    Hotkey::new(HOTKEY_F2, Dpad::UP, HotkeyAction::SOCD_UP_PRIORITY),
    Hotkey::new(HOTKEY_F2, Dpad::DOWN, HotkeyAction::SOCD_NEUTRAL),
    Hotkey::new(HOTKEY_F2, Dpad::LEFT, HotkeyAction::SOCD_LAST_INPUT),
    Hotkey::new(HOTKEY_F2, Dpad::RIGHT, HotkeyAction::INVERT_Y_AXIS),
];

/// The factory bindings as a table.
#[must_use]
pub fn default_hotkeys() -> HotkeyTable {
    // DEFAULT_HOTKEYS is shorter than MAX_HOTKEYS
    HotkeyTable::from_slice(&DEFAULT_HOTKEYS).unwrap_or_default()
}

/// Settings fixed for the lifetime of a pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Debounce interval in milliseconds, 0 disables debouncing.
    pub debounce_ms: u16,
    pub hotkeys: HotkeyTable,
}

impl PipelineConfig {
    #[must_use]
    pub fn new(debounce_ms: u16, hotkeys: HotkeyTable) -> Self {
        Self {
            debounce_ms,
            hotkeys,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(0, default_hotkeys())
    }
}
