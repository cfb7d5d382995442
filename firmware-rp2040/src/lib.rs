//! GPIO gamepad firmware for RP2040.
//!
//! This crate provides the embedded side of the input-normalization
//! pipeline: it samples the switches, runs [`pad_core::Pipeline`] every
//! millisecond and sends the resulting state as a USB HID gamepad.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples every switch on GPIO once per millisecond
//! 2. Debounces, cleans SOCD, detects hotkeys and emulates sticks
//! 3. Outputs the state as a USB HID gamepad
//! 4. Persists hotkey mode changes to the last flash sector
//!
//! See [`gpio_input`] for the pin assignment. GPIO 25 (on-board LED) is
//! toggled on input errors.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with four concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Pad Task**: Runs the [`pad_core::CycleRunner`] paced by a 1 ms ticker
//! - **Output Task**: Receives state signals, formats and sends USB HID reports
//! - **Persist Task**: Writes saved options to flash
//!
//! Communication between tasks uses Embassy's [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics, so neither the USB host's polling nor a
//! flash erase ever stalls the polling loop.
//!
//! # Modules
//!
//! - [`gpio_input`]: switch sampling ([`GpioInputSource`])
//! - [`clock`]: millisecond clock ([`EmbassyClock`])
//! - [`flash_store`]: options persistence ([`FlashConfigStore`])
//! - [`usb_output`]: USB HID output ([`UsbHidOutput`], [`GamepadReport`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`standard-hid`** (default): Standard HID gamepad descriptor (cross-platform)
//! - **`xinput-compat`**: Xbox-style HID descriptor with 16-bit sticks
//! - **`persist-config`** (default): Write mode changes to flash

#![no_std]

// Ensure mutually exclusive HID descriptor features
#[cfg(all(feature = "standard-hid", feature = "xinput-compat"))]
compile_error!("Cannot enable both `standard-hid` and `xinput-compat` features - they define conflicting HID descriptors");

pub mod clock;
pub mod flash_store;
pub mod gpio_input;
pub mod usb_output;

pub use clock::EmbassyClock;
pub use flash_store::{persist_pending, ConfigFlash, FlashConfigStore, PendingSave};
pub use gpio_input::{ButtonPins, DpadPins, GpioInputSource};
pub use usb_output::{
    configure_usb_hid, GamepadReport, LatestStateSink, StateSignal, UsbHidOutput,
};
