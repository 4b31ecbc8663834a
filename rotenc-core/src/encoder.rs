//! Polling-side encoder driver
//!
//! [`RotaryEncoder`] drains the shared [`EncoderState`] from a cooperative
//! context, turns the accumulated edges into rotation and click events, and
//! hands them to the listener.

use rotenc_hal::MonotonicClock;

use crate::config::EncoderConfig;
use crate::listener::{EncoderId, EncoderListener};
use crate::speed::{elapsed_since, estimate_rpm};
use crate::state::EncoderState;

/// Encoder driver front end
///
/// Holds a non-owning reference to the shared state so interrupt and timer
/// glue can keep feeding it while this side polls.
pub struct RotaryEncoder<'a, C, L> {
    id: EncoderId,
    state: &'a EncoderState,
    clock: C,
    listener: L,
    detents_per_revolution: u16,
    fallback_interval_ms: u32,
    /// Clock reading of the previous rotation drain (ms)
    last_drain_ms: u64,
}

impl<'a, C, L> RotaryEncoder<'a, C, L>
where
    C: MonotonicClock,
    L: EncoderListener,
{
    /// Create a poller over `state`
    ///
    /// The speed estimate for the first rotation is measured from this call.
    pub fn new(config: &EncoderConfig, state: &'a EncoderState, clock: C, listener: L) -> Self {
        let last_drain_ms = clock.now_ms();
        Self {
            id: config.id,
            state,
            clock,
            listener,
            detents_per_revolution: config.detents_per_revolution,
            fallback_interval_ms: config.fallback_interval_ms,
            last_drain_ms,
        }
    }

    /// Drain pending activity and notify the listener
    ///
    /// Call repeatedly from the main loop or a periodic task. When nothing
    /// happened since the last call this is a no-op: no callback, and the
    /// speed reference time is left untouched.
    pub fn poll(&mut self) {
        if let Some(sample) = self.state.drain_rotation() {
            let now_ms = self.clock.now_ms();
            let rpm = estimate_rpm(
                sample.triggers,
                elapsed_since(self.last_drain_ms, now_ms),
                self.detents_per_revolution,
                self.fallback_interval_ms,
            );
            self.last_drain_ms = now_ms;

            self.listener.turned(self.id, sample.delta as i32, rpm);
        }

        if self.state.take_click() {
            self.listener.clicked(self.id);
        }
    }

    /// Source identity reported to the listener
    pub fn id(&self) -> EncoderId {
        self.id
    }

    /// Clock reading of the previous rotation drain (ms)
    pub fn last_drain_ms(&self) -> u64 {
        self.last_drain_ms
    }

    /// Get access to the listener
    pub fn listener(&self) -> &L {
        &self.listener
    }
}
