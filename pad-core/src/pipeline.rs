//! The per-cycle normalization pipeline.

use crate::config::{Hotkey, HotkeyTable, PipelineConfig, RuntimeConfig};
use crate::debounce::Debouncer;
use crate::emulate::emulate;
use crate::hotkey::HotkeyDetector;
use crate::mode::apply_hotkey;
use crate::socd::SocdResolver;
use crate::state::{LogicalState, RawInputSample};
use pad_proto::{Buttons, GamepadOptions, HotkeyAction};

/// Result of one [`Pipeline::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleOutput {
    /// State for the report encoder.
    pub state: LogicalState,
    /// Hotkey action fired this cycle.
    pub action: Option<HotkeyAction>,
    /// The runtime configuration changed and should be persisted.
    pub config_changed: bool,
}

/// Owns every piece of cross-cycle state: debounce timers, direction history,
/// hotkey edge memory and the runtime configuration.
///
/// Stage order per cycle is debounce, SOCD cleaning, hotkey detection, mode
/// update and dpad emulation. The SOCD stage uses the configuration in effect
/// at the start of the cycle; emulation uses the updated one.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: RuntimeConfig,
    hotkeys: HotkeyTable,
    debouncer: Debouncer,
    socd: SocdResolver,
    hotkey: HotkeyDetector,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: RuntimeConfig, settings: PipelineConfig) -> Self {
        Self {
            config,
            hotkeys: settings.hotkeys,
            debouncer: Debouncer::new(settings.debounce_ms),
            socd: SocdResolver::new(),
            hotkey: HotkeyDetector::new(),
        }
    }

    /// Start from a persisted record. Its debounce interval is used.
    #[must_use]
    pub fn from_options(options: &GamepadOptions, hotkeys: HotkeyTable) -> Self {
        Self::new(
            RuntimeConfig::from_options(options),
            PipelineConfig::new(options.debounce_ms, hotkeys),
        )
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> RuntimeConfig {
        self.config
    }

    /// The record to persist for the current configuration.
    #[must_use]
    pub const fn options(&self) -> GamepadOptions {
        self.config.to_options(self.debouncer.interval_ms())
    }

    #[inline]
    #[must_use]
    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }

    /// Replace the hotkey table. Edge memory is cleared, so a chord held
    /// across the swap fires once.
    pub fn set_hotkeys(&mut self, hotkeys: HotkeyTable) {
        self.hotkeys = hotkeys;
        self.hotkey.reset();
    }

    /// Run one cycle on a raw sample taken at `now_ms`.
    pub fn step(&mut self, raw: &RawInputSample, now_ms: u32) -> CycleOutput {
        let input = self.debouncer.debounce(raw, now_ms);
        let dpad = self.socd.resolve(input.dpad, self.config.socd_mode);

        let action = self.hotkey.detect(&self.hotkeys, input.buttons, dpad);
        let previous = self.config;
        self.config = apply_hotkey(previous, action);

        let mut buttons = input.buttons;
        let mut dpad = dpad;
        if let Some(chord) = self.hotkey.active(&self.hotkeys) {
            buttons &= !chord.buttons;
            dpad &= !chord.dpad;
            if chord.action.contains(HotkeyAction::HOME_BUTTON) {
                buttons |= Buttons::GUIDE;
            }
            if chord.action.contains(HotkeyAction::CAPTURE_BUTTON) {
                buttons |= Buttons::CAPTURE;
            }
        }

        let mut state = LogicalState {
            buttons,
            left_stick: input.left_stick,
            right_stick: input.right_stick,
            left_trigger: input.left_trigger,
            right_trigger: input.right_trigger,
            ..LogicalState::neutral(&self.config)
        };
        emulate(dpad, &self.config).apply(&mut state);

        CycleOutput {
            state,
            action,
            config_changed: self.config != previous,
        }
    }
}
