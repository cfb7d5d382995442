//! Raw input and clock capabilities.

use core::future::Future;

use crate::state::RawInputSample;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Pin or bus read failed.
    Io,
    /// Read before [`RawInputSource::setup`] completed.
    NotReady,
    /// The input device went away.
    Disconnected,
}

/// Supplies one raw snapshot of every physical input per cycle.
///
/// Implementations own the platform specifics (GPIO, shift registers, an
/// external controller) and must not allocate.
pub trait RawInputSource {
    /// Configure the hardware. Called once before the first read.
    fn setup(&mut self) -> impl Future<Output = Result<(), InputError>>;

    /// Wait for the next cycle and sample every input.
    ///
    /// Implementations that poll pace the cycle here.
    fn read(&mut self) -> impl Future<Output = Result<RawInputSample, InputError>>;
}

/// Monotonic millisecond counter. Wraps at `u32::MAX`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
