//! Shared gamepad value types, mode tables and the persisted options record.
//!
//! This crate holds everything that has a stable representation outside the
//! polling loop:
//!
//! - **Types**: the per-cycle input values
//!   - [`Buttons`] - button bitfield
//!   - [`Dpad`] - cardinal direction flags
//!   - [`AnalogStick`] - stick X/Y position
//!
//! - **Modes**: runtime configuration enums with stable numeric codes
//!   - [`InputMode`], [`DpadMode`], [`SocdMode`]
//!   - [`SocdRule`] / [`SocdRules`] - per-axis cleaning rules behind every
//!     [`SocdMode`]
//!   - [`HotkeyAction`] - effect flags bound to hotkey chords
//!
//! - **Record**: the options record written to persistent storage
//!   - [`GamepadOptions`] with [`GamepadOptions::encode`] /
//!     [`GamepadOptions::decode`]
//!
//! # SOCD policies
//!
//! ```
//! use pad_proto::{SocdMode, SocdRule};
//!
//! let rules = SocdMode::UpPriority.rules();
//! assert_eq!(rules.vertical, SocdRule::UpLeft);
//! assert_eq!(rules.horizontal, SocdRule::Neutral);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod crc;
pub mod modes;
pub mod record;
pub mod types;

// Re-export types at crate root for convenience
pub use crc::calculate_crc8;
pub use modes::{DpadMode, HotkeyAction, InputMode, SocdMode, SocdRule, SocdRules};
pub use record::{GamepadOptions, RecordError, RECORD_MAGIC, RECORD_SIZE, RECORD_VERSION};
pub use types::{AnalogStick, Buttons, Dpad, AXIS_MAX, AXIS_MID, AXIS_MIN};
