//! RP2040 bindings for the rotenc HAL
//!
//! This crate provides RP2040 implementations of the `rotenc-hal` traits on
//! top of Embassy:
//!
//! - `RpGpio`: pin bank handing out pulled-up inputs by number
//! - `DeadlineTimer`: one-shot timer awaited from the task that armed it
//! - `EmbassyClock`: millisecond clock from the Embassy time driver
//!
//! Edge interrupts are not callbacks here. A task awaits
//! `RpInput::wait_for_falling_edge` and `DeadlineTimer::fired` and routes
//! whichever completes into the shared encoder state.

#![no_std]

pub mod clock;
pub mod gpio;
pub mod timer;

pub use clock::EmbassyClock;
pub use gpio::{PinError, RpGpio, RpInput, GPIO_COUNT};
pub use timer::{DeadlineTimer, DeadlineTimers, TimerError};
