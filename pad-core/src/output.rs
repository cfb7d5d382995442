//! Report encoder capability.

use core::future::Future;

use crate::state::LogicalState;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
}

/// Consumes the normalized state once per cycle and turns it into whatever
/// report the active input mode calls for.
pub trait StateSink {
    /// Encode and send one state.
    ///
    /// May wait until the previous report has gone out.
    fn send(&mut self, state: &LogicalState) -> impl Future<Output = Result<(), OutputError>>;

    /// Whether a report sent now would reach the host.
    ///
    /// The runner skips [`send`](Self::send) while this is `false`.
    fn is_ready(&self) -> bool;
}
