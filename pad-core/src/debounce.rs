//! Settle-time debouncer for every digital input.
//!
//! Each button bit and each direction bit has its own channel. A channel only
//! accepts a new level once the raw input has held that level continuously for
//! the configured interval. Any change during the wait restarts it, so input
//! bouncing faster than the interval never gets through.
//!
//! Timestamps are a wrapping `u32` millisecond counter; elapsed time is taken
//! with `wrapping_sub`, which stays correct across the wrap.

use crate::state::{DebouncedInputSample, RawInputSample};
use pad_proto::{Buttons, Dpad};

// Undefined raw bits have no channel and never reach the output
const BUTTON_CHANNELS: usize = Buttons::COUNT;
const DPAD_CHANNELS: usize = Dpad::COUNT;

#[derive(Clone, Copy, Default, Debug)]
struct Channel {
    /// Level reported downstream.
    stable: bool,
    /// Last raw level seen.
    pending: bool,
    /// When `pending` was first seen.
    since_ms: u32,
}

impl Channel {
    const RELEASED: Self = Self {
        stable: false,
        pending: false,
        since_ms: 0,
    };

    #[inline]
    fn update(&mut self, raw: bool, now_ms: u32, interval_ms: u32) -> bool {
        if raw != self.pending {
            self.pending = raw;
            self.since_ms = now_ms;
        }

        if self.pending != self.stable
            && (interval_ms == 0 || now_ms.wrapping_sub(self.since_ms) >= interval_ms)
        {
            self.stable = self.pending;
        }

        self.stable
    }
}

/// Per-input debouncer. An interval of 0 passes input through unchanged.
#[derive(Clone, Debug)]
pub struct Debouncer {
    interval_ms: u16,
    buttons: [Channel; BUTTON_CHANNELS],
    dpad: [Channel; DPAD_CHANNELS],
}

impl Debouncer {
    /// Create a debouncer with every input released.
    #[must_use]
    pub const fn new(interval_ms: u16) -> Self {
        Self {
            interval_ms,
            buttons: [Channel::RELEASED; BUTTON_CHANNELS],
            dpad: [Channel::RELEASED; DPAD_CHANNELS],
        }
    }

    #[inline]
    #[must_use]
    pub const fn interval_ms(&self) -> u16 {
        self.interval_ms
    }

    /// Change the interval. Pending transitions keep their start time.
    pub fn set_interval(&mut self, interval_ms: u16) {
        self.interval_ms = interval_ms;
    }

    /// Filter one raw sample taken at `now_ms`.
    pub fn debounce(&mut self, raw: &RawInputSample, now_ms: u32) -> DebouncedInputSample {
        let interval = u32::from(self.interval_ms);

        let mut buttons = Buttons::NONE;
        for (bit, channel) in self.buttons.iter_mut().enumerate() {
            let mask = Buttons(1 << bit);
            buttons.set(mask, channel.update(raw.buttons.contains(mask), now_ms, interval));
        }

        let mut dpad = Dpad::NONE;
        for (bit, channel) in self.dpad.iter_mut().enumerate() {
            let mask = Dpad(1 << bit);
            dpad.set(mask, channel.update(raw.dpad.contains(mask), now_ms, interval));
        }

        DebouncedInputSample {
            buttons,
            dpad,
            ..*raw
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(0)
    }
}
