//! Board-agnostic debounced rotary encoder driver
//!
//! Turns falling-edge interrupts from a mechanical quadrature encoder with
//! push button into clean application events:
//!
//! - Edge capture (interrupt context) latches the companion phase and arms
//!   a one-shot debounce timer per line
//! - The debounce resolver (timer-callback context) re-samples the line and
//!   accumulates confirmed edges
//! - The poller (cooperative context) drains the accumulated state, estimates
//!   rotational speed and notifies an [`EncoderListener`]
//!
//! # Data flow
//!
//! ```text
//! GPIO edge ─▶ EncoderState::on_*_edge ─▶ OneShotTimer ─▶ EncoderState::on_*_settled
//!                                                                  │
//!                       EncoderListener ◀─ RotaryEncoder::poll ◀───┘
//! ```
//!
//! All state shared between contexts lives in [`EncoderState`], which only
//! uses atomics and is meant to be placed in a `static`.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod counter;
pub mod encoder;
pub mod error;
pub mod init;
pub mod line;
pub mod listener;
pub mod speed;
pub mod state;

pub use config::EncoderConfig;
pub use counter::RotationSample;
pub use encoder::RotaryEncoder;
pub use error::{ConfigError, InitError};
pub use init::{initialize, EncoderHardware};
pub use line::Line;
pub use listener::{EncoderEvent, EncoderId, EncoderListener};
pub use state::EncoderState;
