//! One-shot debounce timers on the Embassy time queue
//!
//! A [`DeadlineTimer`] only records when it should fire. The task that
//! arms it also awaits [`DeadlineTimer::fired`], typically raced against
//! the next pin edge with `embassy_futures::select`.

use core::cell::Cell;

use embassy_time::{Duration, Instant, Timer};
use rotenc_hal::{OneShotTimer, TimerService};

/// Timer allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// All timer slots handed out
    Exhausted,
}

/// Single-task one-shot timer
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    deadline: Cell<Option<Instant>>,
}

impl DeadlineTimer {
    /// Create a disarmed timer
    pub const fn new() -> Self {
        Self {
            deadline: Cell::new(None),
        }
    }

    /// Complete once the armed deadline passes
    ///
    /// Never completes while disarmed. The timer is disarmed again when
    /// this returns.
    pub async fn fired(&self) {
        match self.deadline.get() {
            Some(at) => {
                Timer::at(at).await;
                self.deadline.set(None);
            }
            None => core::future::pending::<()>().await,
        }
    }
}

impl OneShotTimer for DeadlineTimer {
    fn arm_once(&self, delay_us: u32) {
        let at = Instant::now() + Duration::from_micros(delay_us as u64);
        self.deadline.set(Some(at));
    }
}

/// Fixed pool of [`DeadlineTimer`]s
///
/// Sized to match the number of concurrent waiters the time queue holds.
#[derive(Debug)]
pub struct DeadlineTimers {
    remaining: u8,
}

impl DeadlineTimers {
    /// Pool that hands out at most `capacity` timers
    pub const fn new(capacity: u8) -> Self {
        Self {
            remaining: capacity,
        }
    }
}

impl TimerService for DeadlineTimers {
    type Timer = DeadlineTimer;
    type Error = TimerError;

    fn create_one_shot(&mut self) -> Result<Self::Timer, Self::Error> {
        self.remaining = self.remaining.checked_sub(1).ok_or(TimerError::Exhausted)?;
        Ok(DeadlineTimer::new())
    }
}
