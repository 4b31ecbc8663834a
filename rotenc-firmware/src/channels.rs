//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicU32, Ordering};

use rotenc_core::EncoderEvent;

/// Channel capacity for encoder events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Encoder events from the poll task to the display task
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, EncoderEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Events dropped because the display task fell behind
static DROPPED_EVENTS: AtomicU32 = AtomicU32::new(0);

/// Count an event that did not fit into [`EVENT_CHANNEL`]
///
/// Returns the running total.
pub fn note_dropped_event() -> u32 {
    DROPPED_EVENTS.fetch_add(1, Ordering::Relaxed) + 1
}
