//! GPIO input source sampling every switch once per millisecond.
//!
//! Every switch connects its pin to ground; pins use the internal pull-ups,
//! so a low level means pressed. A digital controller has no sticks: they
//! are reported centered, and the analog trigger values follow the LT/RT
//! switches.
//!
//! # Pins
//!
//! | Input | GPIO | Input | GPIO |
//! |-------|------|-------|------|
//! | Up    | 2    | A     | 6    |
//! | Down  | 3    | B     | 7    |
//! | Right | 4    | RT    | 8    |
//! | Left  | 5    | LT    | 9    |
//! | Back  | 16   | X     | 10   |
//! | Start | 17   | Y     | 11   |
//! | LS    | 18   | RB    | 12   |
//! | RS    | 19   | LB    | 13   |
//! | Guide | 20   | Capture | 21 |

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use pad_core::{InputError, InputSample, RawInputSample, RawInputSource};
use pad_proto::{Buttons, Dpad};

/// Polling period of the pipeline.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(1);

pub type ButtonPins<'d> = [(Input<'d>, Buttons); Buttons::COUNT];
pub type DpadPins<'d> = [(Input<'d>, Dpad); Dpad::COUNT];

/// Reads all switches on a fixed 1 ms tick.
pub struct GpioInputSource<'d> {
    buttons: ButtonPins<'d>,
    dpad: DpadPins<'d>,
    ticker: Ticker,
    ready: bool,
}

impl<'d> GpioInputSource<'d> {
    /// Pins must already be configured as inputs with pull-ups.
    #[must_use]
    pub fn new(buttons: ButtonPins<'d>, dpad: DpadPins<'d>) -> Self {
        Self {
            buttons,
            dpad,
            ticker: Ticker::every(CYCLE_PERIOD),
            ready: false,
        }
    }

    fn sample(&self) -> RawInputSample {
        let mut buttons = Buttons::NONE;
        for (pin, button) in &self.buttons {
            buttons.set(*button, pin.is_low());
        }

        let mut dpad = Dpad::NONE;
        for (pin, direction) in &self.dpad {
            dpad.set(*direction, pin.is_low());
        }

        InputSample {
            buttons,
            dpad,
            left_trigger: trigger_value(buttons.contains(Buttons::LT)),
            right_trigger: trigger_value(buttons.contains(Buttons::RT)),
            ..InputSample::neutral()
        }
    }
}

#[inline]
const fn trigger_value(pressed: bool) -> u8 {
    if pressed {
        u8::MAX
    } else {
        0
    }
}

impl RawInputSource for GpioInputSource<'_> {
    async fn setup(&mut self) -> Result<(), InputError> {
        // Start the cycle clock from now, not from construction
        self.ticker.reset();
        self.ready = true;
        defmt::info!("GPIO input ready, polling every {} us", CYCLE_PERIOD.as_micros());
        Ok(())
    }

    async fn read(&mut self) -> Result<RawInputSample, InputError> {
        if !self.ready {
            return Err(InputError::NotReady);
        }
        self.ticker.next().await;
        Ok(self.sample())
    }
}
