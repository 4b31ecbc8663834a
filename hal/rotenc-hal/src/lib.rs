//! rotenc Hardware Abstraction Layer
//!
//! This crate defines the platform collaborators the encoder driver needs,
//! as traits that chip-specific HALs implement. The driver core only ever
//! talks to these traits, which keeps it host-testable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (rotenc-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotenc-core (driver)                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotenc-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  rotenc-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::GpioController`] - Digital input and edge setup
//! - [`timer::OneShotTimer`], [`timer::TimerService`] - Debounce scheduling
//! - [`clock::MonotonicClock`] - Millisecond time base

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use gpio::{GpioController, InputPin, Level, PinId};
pub use timer::{OneShotTimer, TimerService};
