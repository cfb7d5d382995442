//! Edge-triggered hotkey chord detection.

use crate::config::{Hotkey, MAX_HOTKEYS};
use pad_proto::{Buttons, Dpad, HotkeyAction};

/// Watches the cleaned input for configured chords.
///
/// Each cycle the first satisfied chord in table order is the *active* chord.
/// An action fires only on the cycle its chord becomes active *and* was not
/// satisfied the cycle before, so holding a chord fires exactly once and a
/// chord that was already held when an earlier one released stays quiet.
#[derive(Clone, Copy, Default, Debug)]
pub struct HotkeyDetector {
    /// Bit `i` set if table entry `i` was satisfied last cycle.
    satisfied: u16,
    active: Option<usize>,
}

impl HotkeyDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            satisfied: 0,
            active: None,
        }
    }

    /// Evaluate one cycle. Returns the action to apply, if any.
    ///
    /// Entries past [`MAX_HOTKEYS`] are ignored.
    pub fn detect(
        &mut self,
        hotkeys: &[Hotkey],
        buttons: Buttons,
        dpad: Dpad,
    ) -> Option<HotkeyAction> {
        let mut satisfied = 0u16;
        let mut first = None;

        for (i, hotkey) in hotkeys.iter().enumerate().take(MAX_HOTKEYS) {
            if hotkey.is_satisfied(buttons, dpad) {
                satisfied |= 1 << i;
                first.get_or_insert(i);
            }
        }

        let fired = first
            .filter(|&i| self.satisfied & (1 << i) == 0)
            .map(|i| hotkeys[i].action)
            .filter(|action| !action.is_empty());

        #[cfg(feature = "defmt")]
        if let Some(action) = fired {
            defmt::debug!("hotkey fired: {:?}", action);
        }

        self.satisfied = satisfied;
        self.active = first;
        fired
    }

    /// The chord held as the first match during the last [`detect`](Self::detect).
    #[must_use]
    pub fn active<'a>(&self, hotkeys: &'a [Hotkey]) -> Option<&'a Hotkey> {
        self.active.and_then(|i| hotkeys.get(i))
    }

    /// Forget which chords were held, e.g. after swapping the table.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
