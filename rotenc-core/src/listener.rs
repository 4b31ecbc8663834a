//! Listener capability
//!
//! The application reacts to encoder activity by implementing
//! [`EncoderListener`]. Callbacks are only ever invoked from
//! [`RotaryEncoder::poll`](crate::RotaryEncoder::poll), never from
//! interrupt or timer context, so implementations may do ordinary work
//! as long as they return promptly.

/// Identity of the encoder that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderId(pub u8);

/// Receiver of encoder events
pub trait EncoderListener {
    /// The knob was turned
    ///
    /// - `delta_clicks`: net detents since the previous event (positive =
    ///   clockwise). May be zero if the knob moved back and forth.
    /// - `rpm`: estimated speed magnitude in revolutions per minute
    fn turned(&mut self, source: EncoderId, delta_clicks: i32, rpm: i32);

    /// The push button was pressed
    fn clicked(&mut self, source: EncoderId);
}

impl<L: EncoderListener + ?Sized> EncoderListener for &mut L {
    fn turned(&mut self, source: EncoderId, delta_clicks: i32, rpm: i32) {
        (**self).turned(source, delta_clicks, rpm)
    }

    fn clicked(&mut self, source: EncoderId) {
        (**self).clicked(source)
    }
}

/// Listener callbacks as a value
///
/// Convenient for forwarding events over a channel to another task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderEvent {
    /// Rotation with net detents and speed estimate
    Turned {
        source: EncoderId,
        delta_clicks: i32,
        rpm: i32,
    },
    /// Button press
    Clicked { source: EncoderId },
}

impl EncoderEvent {
    /// Encoder that produced the event
    pub fn source(&self) -> EncoderId {
        match self {
            EncoderEvent::Turned { source, .. } | EncoderEvent::Clicked { source } => *source,
        }
    }

    /// Replay the event onto a listener
    pub fn dispatch<L: EncoderListener + ?Sized>(self, listener: &mut L) {
        match self {
            EncoderEvent::Turned {
                source,
                delta_clicks,
                rpm,
            } => listener.turned(source, delta_clicks, rpm),
            EncoderEvent::Clicked { source } => listener.clicked(source),
        }
    }
}
