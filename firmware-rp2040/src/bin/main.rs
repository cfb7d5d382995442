#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use pad_core::{CycleRunner, PipelineConfig, StateSink};
use pad_proto::{Buttons, Dpad};
use padclean_rp2040::{
    configure_usb_hid, ConfigFlash, EmbassyClock, FlashConfigStore,
    GpioInputSource, LatestStateSink, PendingSave, StateSignal, UsbHidOutput,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type PadRunner = CycleRunner<GpioInputSource<'static>, EmbassyClock, LatestStateSink, FlashConfigStore>;

/// Signal for passing the logical state from the pad task to the output task.
/// Using Signal instead of Channel provides "latest value wins" semantics,
/// which is appropriate for gamepad state where we only care about the most recent input.
static STATE_SIGNAL: StaticCell<StateSignal> = StaticCell::new();

/// Options waiting to be written to flash.
static PENDING_SAVE: StaticCell<PendingSave> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("padclean starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = STATE_SIGNAL.init(StateSignal::new());
    let pending = PENDING_SAVE.init(PendingSave::new());

    // --- Switch inputs ---
    let dpad = [
        (Input::new(p.PIN_2, Pull::Up), Dpad::UP),
        (Input::new(p.PIN_3, Pull::Up), Dpad::DOWN),
        (Input::new(p.PIN_4, Pull::Up), Dpad::RIGHT),
        (Input::new(p.PIN_5, Pull::Up), Dpad::LEFT),
    ];
    let buttons = [
        (Input::new(p.PIN_6, Pull::Up), Buttons::A),
        (Input::new(p.PIN_7, Pull::Up), Buttons::B),
        (Input::new(p.PIN_8, Pull::Up), Buttons::RT),
        (Input::new(p.PIN_9, Pull::Up), Buttons::LT),
        (Input::new(p.PIN_10, Pull::Up), Buttons::X),
        (Input::new(p.PIN_11, Pull::Up), Buttons::Y),
        (Input::new(p.PIN_12, Pull::Up), Buttons::RB),
        (Input::new(p.PIN_13, Pull::Up), Buttons::LB),
        (Input::new(p.PIN_16, Pull::Up), Buttons::BACK),
        (Input::new(p.PIN_17, Pull::Up), Buttons::START),
        (Input::new(p.PIN_18, Pull::Up), Buttons::LS),
        (Input::new(p.PIN_19, Pull::Up), Buttons::RS),
        (Input::new(p.PIN_20, Pull::Up), Buttons::GUIDE),
        (Input::new(p.PIN_21, Pull::Up), Buttons::CAPTURE),
    ];
    let gpio_input = GpioInputSource::new(buttons, dpad);

    // --- Options storage ---
    let mut flash: ConfigFlash<'static> = Flash::new_blocking(p.FLASH);
    let store = FlashConfigStore::new(&mut flash, pending);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("padclean Controller");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    // Create output
    let usb_output = UsbHidOutput::new(hid_writer);

    // On-board LED for error indication
    let led = Output::new(p.PIN_25, Level::Low);

    // --- Pipeline ---
    let runner = match CycleRunner::start(
        gpio_input,
        EmbassyClock,
        LatestStateSink::new(signal),
        store,
        PipelineConfig::default(),
    )
    .await
    {
        Ok(runner) => runner,
        Err(e) => {
            error!("Pipeline start failed: {:?}", e);
            return;
        }
    };
    info!("Runtime config: {:?}", runner.pipeline().config());

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(pad_task(runner, led).unwrap());
    spawner.spawn(output_task(usb_output, signal).unwrap());
    #[cfg(feature = "persist-config")]
    spawner.spawn(persist_task(flash, pending).unwrap());
    #[cfg(not(feature = "persist-config"))]
    drop(flash);

    info!("padclean initialized");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Pad task - one pipeline cycle per millisecond tick.
#[embassy_executor::task]
async fn pad_task(mut runner: PadRunner, mut led: Output<'static>) {
    loop {
        match runner.process_one().await {
            Ok(cycle) => {
                if let Some(action) = cycle.action {
                    info!("Hotkey: {:?}", action);
                }
            }
            Err(e) => {
                // The runner already sent a neutral state
                error!("Cycle error: {:?}", e);
                led.toggle();
            }
        }
    }
}

/// Output task - waits for state signals and sends them to USB HID.
#[embassy_executor::task]
async fn output_task(mut output: UsbHidOutput<'static>, signal: &'static StateSignal) {
    loop {
        if !output.is_ready() {
            output.wait_ready().await;
            info!("USB HID ready, forwarding gamepad state...");
        }

        // Wait for the next state (blocks until signaled)
        let state = signal.wait().await;
        if let Err(e) = output.send(&state).await {
            error!("Output error: {:?}", e);
        }
    }
}

/// Persist task - writes saved options to flash off the polling loop.
#[cfg(feature = "persist-config")]
#[embassy_executor::task]
async fn persist_task(flash: ConfigFlash<'static>, pending: &'static PendingSave) {
    padclean_rp2040::persist_pending(flash, pending).await
}
