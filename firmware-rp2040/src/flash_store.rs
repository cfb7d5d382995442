//! Options record storage in the last sector of the on-chip flash.
//!
//! Saving from the polling loop only hands the record to a [`Signal`]; the
//! flash erase and write run in [`persist_pending`], which the firmware
//! drives from its own task. The loop keeps its 1 ms cadence while the
//! sector is rewritten.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use pad_core::{ConfigStore, StoreError};
use pad_proto::{GamepadOptions, RECORD_SIZE};

/// Flash size of the Raspberry Pi Pico.
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the options sector from the start of flash.
pub const CONFIG_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Quiet time before a save reaches the flash. Saves within the window
/// collapse into one write of the latest record.
pub const SAVE_DELAY: Duration = Duration::from_millis(500);

pub type ConfigFlash<'d> = Flash<'d, FLASH, Blocking, FLASH_SIZE>;

/// Latest record waiting to be written.
pub type PendingSave = Signal<CriticalSectionRawMutex, GamepadOptions>;

/// Read and validate the stored record.
pub fn read_record(flash: &mut ConfigFlash<'_>) -> Result<GamepadOptions, StoreError> {
    let mut buf = [0u8; RECORD_SIZE];
    flash
        .blocking_read(CONFIG_OFFSET, &mut buf)
        .map_err(|_| StoreError::Io)?;
    Ok(GamepadOptions::decode(&buf)?)
}

/// Erase the options sector and write `options` to it.
pub fn write_record(flash: &mut ConfigFlash<'_>, options: &GamepadOptions) -> Result<(), StoreError> {
    flash
        .blocking_erase(CONFIG_OFFSET, CONFIG_OFFSET + ERASE_SIZE as u32)
        .map_err(|_| StoreError::Io)?;
    flash
        .blocking_write(CONFIG_OFFSET, &options.to_bytes())
        .map_err(|_| StoreError::Io)
}

/// [`ConfigStore`] backed by the record read at boot and a pending-save signal.
pub struct FlashConfigStore {
    current: Result<GamepadOptions, StoreError>,
    pending: &'static PendingSave,
}

impl FlashConfigStore {
    /// Read the stored record now; the flash itself moves on to the writer.
    pub fn new(flash: &mut ConfigFlash<'_>, pending: &'static PendingSave) -> Self {
        let current = read_record(flash);
        if let Err(e) = current {
            defmt::warn!("options record unreadable: {:?}", e);
        }
        Self { current, pending }
    }
}

impl ConfigStore for FlashConfigStore {
    async fn load(&mut self) -> Result<GamepadOptions, StoreError> {
        self.current
    }

    async fn save(&mut self, options: &GamepadOptions) -> Result<(), StoreError> {
        self.current = Ok(*options);
        self.pending.signal(*options);
        Ok(())
    }
}

/// Write pending records forever. Never returns.
pub async fn persist_pending(mut flash: ConfigFlash<'_>, pending: &'static PendingSave) -> ! {
    loop {
        let mut options = pending.wait().await;
        Timer::after(SAVE_DELAY).await;
        if let Some(latest) = pending.try_take() {
            options = latest;
        }

        match write_record(&mut flash, &options) {
            Ok(()) => defmt::info!("options saved: {:?}", options),
            Err(e) => defmt::error!("options save failed: {:?}", e),
        }
    }
}
