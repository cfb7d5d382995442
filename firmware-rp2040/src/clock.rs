//! Millisecond clock over the embassy time driver.

use embassy_time::Instant;
use pad_core::Clock;

/// Uptime in milliseconds, truncated to `u32` so it wraps every ~49 days.
#[derive(Clone, Copy, Default, Debug)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
