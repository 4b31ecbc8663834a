//! Encoder polling task
//!
//! Drains the shared encoder state at a fixed rate and forwards the
//! resulting events to the display task.

use defmt::*;
use embassy_time::{Duration, Ticker};

use rotenc_core::{EncoderEvent, EncoderId, EncoderListener, RotaryEncoder};
use rotenc_hal_rp2040::EmbassyClock;

use crate::channels::{note_dropped_event, EVENT_CHANNEL};

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// Listener that logs events and queues them for the display
pub struct ChannelListener;

impl ChannelListener {
    fn forward(&mut self, event: EncoderEvent) {
        if EVENT_CHANNEL.try_send(event).is_err() {
            let dropped = note_dropped_event();
            warn!("Event channel full, {} events dropped", dropped);
        }
    }
}

impl EncoderListener for ChannelListener {
    fn turned(&mut self, source: EncoderId, delta_clicks: i32, rpm: i32) {
        debug!("Encoder {} turned: delta={} rpm={}", source.0, delta_clicks, rpm);
        self.forward(EncoderEvent::Turned {
            source,
            delta_clicks,
            rpm,
        });
    }

    fn clicked(&mut self, source: EncoderId) {
        debug!("Encoder {} clicked", source.0);
        self.forward(EncoderEvent::Clicked { source });
    }
}

/// Poll task - drains encoder state every [`POLL_INTERVAL_MS`]
#[embassy_executor::task]
pub async fn poll_task(mut encoder: RotaryEncoder<'static, EmbassyClock, ChannelListener>) {
    info!("Poll task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;
        encoder.poll();
    }
}
