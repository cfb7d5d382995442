//! USB HID report encoder.

use defmt::Format;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use pad_core::{LogicalState, OutputError, StateSink};
use pad_proto::Dpad;

/// Hat switch value for "no direction" (outside the logical range).
pub const HAT_NEUTRAL: u8 = 8;

/// USB HID gamepad report.
///
/// Layout: buttons (2 bytes), hat (low nibble of 1 byte), left stick X/Y,
/// right stick X/Y, left and right trigger. Sticks are one byte each with the
/// standard descriptor and two bytes little endian with `xinput-compat`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Format)]
pub struct GamepadReport {
    pub buttons: u16,
    /// 0 = up, clockwise in 45 degree steps, [`HAT_NEUTRAL`] when released.
    pub hat: u8,
    pub left_stick_x: i16,
    pub left_stick_y: i16,
    pub right_stick_x: i16,
    pub right_stick_y: i16,
    pub left_trigger: u8,
    pub right_trigger: u8,
}

#[cfg(not(feature = "xinput-compat"))]
const STICK_BYTES: usize = 1;
#[cfg(feature = "xinput-compat")]
const STICK_BYTES: usize = 2;

impl GamepadReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 2 + 1 + 4 * STICK_BYTES + 2;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..2].copy_from_slice(&self.buttons.to_le_bytes());
        out[2] = self.hat;

        let sticks = [
            self.left_stick_x,
            self.left_stick_y,
            self.right_stick_x,
            self.right_stick_y,
        ];
        for (chunk, value) in out[3..3 + 4 * STICK_BYTES]
            .chunks_exact_mut(STICK_BYTES)
            .zip(sticks)
        {
            chunk.copy_from_slice(&encode_axis(value));
        }

        out[Self::SIZE - 2] = self.left_trigger;
        out[Self::SIZE - 1] = self.right_trigger;
        out
    }
}

#[cfg(not(feature = "xinput-compat"))]
#[inline]
fn encode_axis(value: i16) -> [u8; STICK_BYTES] {
    // High byte, clamped to the descriptor's -127..=127
    [((value >> 8) as i8).max(-127) as u8]
}

#[cfg(feature = "xinput-compat")]
#[inline]
fn encode_axis(value: i16) -> [u8; STICK_BYTES] {
    value.max(-i16::MAX).to_le_bytes()
}

/// Hat switch position for a cleaned dpad.
#[must_use]
pub fn hat_from_dpad(dpad: Dpad) -> u8 {
    match (dpad.up(), dpad.down(), dpad.left(), dpad.right()) {
        (true, false, false, false) => 0,
        (true, false, false, true) => 1,
        (false, false, false, true) => 2,
        (false, true, false, true) => 3,
        (false, true, false, false) => 4,
        (false, true, true, false) => 5,
        (false, false, true, false) => 6,
        (true, false, true, false) => 7,
        _ => HAT_NEUTRAL,
    }
}

impl From<&LogicalState> for GamepadReport {
    fn from(state: &LogicalState) -> Self {
        Self {
            buttons: state.buttons.raw(),
            hat: hat_from_dpad(state.dpad),
            left_stick_x: state.left_stick.x,
            left_stick_y: state.left_stick.y,
            right_stick_x: state.right_stick.x,
            right_stick_y: state.right_stick.y,
            left_trigger: state.left_trigger,
            right_trigger: state.right_trigger,
        }
    }
}

/// Standard HID Gamepad Report Descriptor.
///
/// This descriptor defines a gamepad with:
/// - 16 buttons
/// - an 8-way hat switch with a null state
/// - 2 analog sticks (X/Y each, signed 8-bit)
/// - 2 triggers (unsigned 8-bit)
#[cfg(not(feature = "xinput-compat"))]
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x10, //   Report Count (16)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x39, //   Usage (Hat switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x35, 0x00, //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x45, 0x00, //   Physical Maximum (0) - back to logical units
    0x81, 0x03, //   Input (Constant) - 4 bit padding
    //
    // --- Left Stick ---
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x95, 0x02, //   Report Count (2)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Right Stick ---
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Triggers ---
    0x09, 0x33, //   Usage (Rx) - Left trigger
    0x09, 0x34, //   Usage (Ry) - Right trigger
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// XInput-compatible HID Report Descriptor.
///
/// Same layout with full 16-bit sticks, closer to what Windows games expect
/// from an Xbox controller.
#[cfg(feature = "xinput-compat")]
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0xA1, 0x00, //   Collection (Physical)
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x10, //     Usage Maximum (Button 16)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x10, //     Report Count (16)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- Hat switch ---
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x39, //     Usage (Hat switch)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x07, //     Logical Maximum (7)
    0x35, 0x00, //     Physical Minimum (0)
    0x46, 0x3B, 0x01, // Physical Maximum (315)
    0x65, 0x14, //     Unit (Degrees)
    0x75, 0x04, //     Report Size (4)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x42, //     Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //     Unit (None)
    0x45, 0x00, //     Physical Maximum (0) - back to logical units
    0x81, 0x03, //     Input (Constant) - 4 bit padding
    //
    // --- Left Stick ---
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x01, 0x80, // Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, // Logical Maximum (32767)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x10, //     Report Size (16) - Full 16-bit for XInput
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- Right Stick ---
    0x09, 0x32, //     Usage (Z)
    0x09, 0x35, //     Usage (Rz)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- Triggers ---
    0x09, 0x33, //     Usage (Rx)
    0x09, 0x34, //     Usage (Ry)
    0x15, 0x00, //     Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    0xC0, //   End Collection
    0xC0, // End Collection
];

type UsbDriver<'d> = Driver<'d, USB>;

/// USB HID gamepad output.
///
/// Wraps an embassy-usb HID writer to send gamepad reports.
pub struct UsbHidOutput<'d> {
    writer: HidWriter<'d, UsbDriver<'d>, { GamepadReport::SIZE }>,
    ready: bool,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from the given HID writer.
    pub fn new(writer: HidWriter<'d, UsbDriver<'d>, { GamepadReport::SIZE }>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }
}

impl StateSink for UsbHidOutput<'_> {
    async fn send(&mut self, state: &LogicalState) -> Result<(), OutputError> {
        let report = GamepadReport::from(state);
        match self.writer.write(&report.as_bytes()).await {
            Ok(()) => Ok(()),
            // Bus reset or unplug; wait_ready() rearms
            Err(EndpointError::Disabled) => {
                self.ready = false;
                Err(OutputError::NotReady)
            }
            Err(_) => Err(OutputError::Io),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Latest-value handoff from the polling loop to the USB task.
pub type StateSignal = Signal<CriticalSectionRawMutex, LogicalState>;

/// [`StateSink`] that only publishes the state; the USB task picks up the
/// newest one whenever the host polls. Never blocks the polling loop.
pub struct LatestStateSink {
    signal: &'static StateSignal,
}

impl LatestStateSink {
    #[must_use]
    pub const fn new(signal: &'static StateSignal) -> Self {
        Self { signal }
    }
}

impl StateSink for LatestStateSink {
    async fn send(&mut self, state: &LogicalState) -> Result<(), OutputError> {
        self.signal.signal(*state);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
) -> HidWriter<'d, UsbDriver<'d>, { GamepadReport::SIZE }> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
