//! One-shot timer abstractions
//!
//! Debounce scheduling needs exactly one primitive: "call me back once,
//! `n` microseconds from now". Timers are created up front and re-armed
//! for the lifetime of the driver.

/// A single-shot timer handle
///
/// Arming an already armed timer is undefined at the platform level.
/// Callers must gate re-arming themselves (the encoder does so with its
/// per-line pending flag).
pub trait OneShotTimer {
    /// Schedule the timer's callback to run once after `delay_us`
    fn arm_once(&self, delay_us: u32);
}

impl<T: OneShotTimer + ?Sized> OneShotTimer for &T {
    fn arm_once(&self, delay_us: u32) {
        (**self).arm_once(delay_us)
    }
}

/// Factory for one-shot timers
///
/// Platforms with a fixed pool of hardware alarms report exhaustion
/// through `Error` rather than handing out a dead handle.
pub trait TimerService {
    /// Timer handle type
    type Timer: OneShotTimer;

    /// Error type for allocation failures
    type Error;

    /// Allocate a new one-shot timer
    fn create_one_shot(&mut self) -> Result<Self::Timer, Self::Error>;
}
