//! Persistent options storage capability.

use core::future::Future;

use pad_proto::{GamepadOptions, RecordError};

/// Error type for storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Storage medium read, write or erase failed.
    Io,
    /// The stored bytes are not a valid record.
    Record(RecordError),
}

impl From<RecordError> for StoreError {
    fn from(err: RecordError) -> Self {
        StoreError::Record(err)
    }
}

/// Loads and saves the [`GamepadOptions`] record.
///
/// Erased or never-written storage reports [`StoreError::Record`]; callers
/// fall back to [`GamepadOptions::DEFAULT`].
pub trait ConfigStore {
    fn load(&mut self) -> impl Future<Output = Result<GamepadOptions, StoreError>>;

    /// Persist `options`. May complete before the medium is written.
    fn save(&mut self, options: &GamepadOptions) -> impl Future<Output = Result<(), StoreError>>;
}
