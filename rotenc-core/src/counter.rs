//! Packed rotation counter
//!
//! `total_triggers` and `delta` are stored in one 32-bit atomic word so that
//! the poller can read and clear both with a single swap. A producer write
//! can never land between the read and the clear, so a drained sample always
//! pairs a trigger count with the delta of the very same edges.
//!
//! Layout:
//!
//! ```text
//!  31            16 15             0
//! ┌────────────────┬────────────────┐
//! │ triggers (u16) │  delta (i16)   │
//! └────────────────┴────────────────┘
//! ```

use portable_atomic::{AtomicU32, Ordering};

/// Upper bound on triggers accumulated between two drains
///
/// Capped at `i16::MAX` so `delta` (bounded by the trigger count) cannot
/// overflow its half of the word.
pub const MAX_TRIGGERS: u16 = i16::MAX as u16;

/// Rotation direction of one confirmed detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive delta
    Clockwise,
    /// Negative delta
    CounterClockwise,
}

impl Direction {
    /// Contribution of one detent to the signed delta
    pub const fn step(self) -> i16 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Confirmed edges accumulated since the previous drain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationSample {
    /// Number of confirmed phase-A edges
    pub triggers: u16,
    /// Net signed detent count
    pub delta: i16,
}

impl RotationSample {
    const fn pack(self) -> u32 {
        ((self.triggers as u32) << 16) | (self.delta as u16 as u32)
    }

    const fn unpack(word: u32) -> Self {
        Self {
            triggers: (word >> 16) as u16,
            delta: word as u16 as i16,
        }
    }

    /// Whether any edge was recorded
    pub const fn is_empty(&self) -> bool {
        self.triggers == 0
    }
}

/// Lock-free accumulator for confirmed phase-A edges
#[derive(Debug, Default)]
pub struct RotationCounter {
    word: AtomicU32,
}

impl RotationCounter {
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
        }
    }

    /// Record one confirmed detent
    ///
    /// Returns `false` if the counter is saturated; the edge is dropped
    /// and counting resumes after the next drain.
    pub fn record(&self, direction: Direction) -> bool {
        self.word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                let sample = RotationSample::unpack(word);
                if sample.triggers >= MAX_TRIGGERS {
                    return None;
                }
                Some(
                    RotationSample {
                        triggers: sample.triggers + 1,
                        delta: sample.delta + direction.step(),
                    }
                    .pack(),
                )
            })
            .is_ok()
    }

    /// Read and clear the accumulated edges in one atomic step
    ///
    /// Returns `None` when nothing was recorded since the last drain.
    pub fn drain(&self) -> Option<RotationSample> {
        let sample = RotationSample::unpack(self.word.swap(0, Ordering::AcqRel));
        if sample.is_empty() {
            None
        } else {
            Some(sample)
        }
    }

    /// Current accumulated edges without clearing them
    pub fn peek(&self) -> RotationSample {
        RotationSample::unpack(self.word.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counter_drains_nothing() {
        let counter = RotationCounter::new();
        assert_eq!(counter.drain(), None);
        assert!(counter.peek().is_empty());
    }

    #[test]
    fn test_record_and_drain() {
        let counter = RotationCounter::new();
        counter.record(Direction::Clockwise);
        counter.record(Direction::Clockwise);
        counter.record(Direction::CounterClockwise);

        assert_eq!(
            counter.drain(),
            Some(RotationSample {
                triggers: 3,
                delta: 1
            })
        );
        // Both fields cleared together
        assert_eq!(counter.drain(), None);
        assert_eq!(counter.peek(), RotationSample::default());
    }

    #[test]
    fn test_negative_delta_survives_packing() {
        let counter = RotationCounter::new();
        for _ in 0..5 {
            counter.record(Direction::CounterClockwise);
        }
        assert_eq!(
            counter.drain(),
            Some(RotationSample {
                triggers: 5,
                delta: -5
            })
        );
    }

    #[test]
    fn test_back_and_forth_reports_zero_delta() {
        let counter = RotationCounter::new();
        counter.record(Direction::Clockwise);
        counter.record(Direction::CounterClockwise);

        let sample = counter.drain().unwrap();
        assert_eq!(sample.triggers, 2);
        assert_eq!(sample.delta, 0);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let counter = RotationCounter::new();
        for _ in 0..MAX_TRIGGERS {
            assert!(counter.record(Direction::CounterClockwise));
        }
        assert!(!counter.record(Direction::CounterClockwise));

        let sample = counter.drain().unwrap();
        assert_eq!(sample.triggers, MAX_TRIGGERS);
        assert_eq!(sample.delta, -(MAX_TRIGGERS as i16));

        // Counting resumes after the drain
        assert!(counter.record(Direction::Clockwise));
    }
}
