//! Platform-agnostic gamepad input normalization.
//!
//! This crate turns raw switch and stick readings into a clean logical state
//! every polling cycle, without any platform-specific dependencies. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! One [`Pipeline::step`] runs these stages in order:
//!
//! - [`debounce`]: per-input settle timers ([`Debouncer`])
//! - [`socd`]: opposing direction cleaning ([`SocdResolver`])
//! - [`hotkey`]: edge-triggered chord detection ([`HotkeyDetector`])
//! - [`mode`]: hotkey actions applied to the [`RuntimeConfig`] ([`apply_hotkey`])
//! - [`emulate`]: dpad to analog stick emulation ([`DpadOutput`])
//!
//! Around the pipeline sit the capability traits the platform implements:
//!
//! - [`input`]: [`RawInputSource`] and [`Clock`]
//! - [`output`]: [`StateSink`]
//! - [`store`]: [`ConfigStore`]
//! - [`runner`]: [`CycleRunner`] wires them to a pipeline
//!
//! # Example
//!
//! ```rust
//! use pad_core::{InputSample, Pipeline, PipelineConfig, RuntimeConfig, HOTKEY_F1};
//! use pad_proto::{AnalogStick, Dpad, DpadMode, AXIS_MIN};
//!
//! let mut pipeline = Pipeline::new(RuntimeConfig::DEFAULT, PipelineConfig::default());
//!
//! // Back + Start + Up switches the dpad to left stick emulation
//! let raw = InputSample { buttons: HOTKEY_F1, dpad: Dpad::UP, ..InputSample::neutral() };
//! let out = pipeline.step(&raw, 0);
//! assert!(out.config_changed);
//! assert_eq!(pipeline.config().dpad_mode, DpadMode::LeftAnalog);
//!
//! let raw = InputSample { dpad: Dpad::UP | Dpad::LEFT, ..InputSample::neutral() };
//! let out = pipeline.step(&raw, 1);
//! assert!(out.state.dpad.is_empty());
//! assert_eq!(out.state.left_stick, AnalogStick::new(AXIS_MIN, AXIS_MIN));
//! assert!(out.state.buttons.is_empty());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod debounce;
pub mod emulate;
pub mod hotkey;
pub mod input;
pub mod mode;
pub mod output;
pub mod pipeline;
pub mod runner;
pub mod socd;
pub mod state;
pub mod store;

// Re-export main types at crate root
pub use config::{
    default_hotkeys, Hotkey, HotkeyTable, PipelineConfig, RuntimeConfig, DEFAULT_HOTKEYS,
    HOTKEY_F1, HOTKEY_F2, MAX_HOTKEYS,
};
pub use debounce::Debouncer;
pub use emulate::{dpad_to_stick, emulate, DpadOutput};
pub use hotkey::HotkeyDetector;
pub use input::{Clock, InputError, RawInputSource};
pub use mode::apply_hotkey;
pub use output::{OutputError, StateSink};
pub use pipeline::{CycleOutput, Pipeline};
pub use runner::{CycleError, CycleRunner};
pub use socd::{AxisHistory, Direction, DirectionHistory, SocdResolver};
pub use state::{DebouncedInputSample, InputSample, LogicalState, RawInputSample};
pub use store::{ConfigStore, StoreError};
