//! Monotonic clock backed by the Embassy time driver

use embassy_time::Instant;
use rotenc_hal::MonotonicClock;

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
