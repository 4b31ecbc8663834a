//! Sensed lines and their debounce gate
//!
//! Each interrupt-driven line cycles through two states:
//!
//! ```text
//! Idle ──(edge sensed)──▶ Armed ──(debounce timer fired)──▶ Idle
//! ```
//!
//! While armed, further edges on the line belong to the in-flight cycle
//! and are ignored. That is the whole debounce mechanism.

use portable_atomic::{AtomicBool, Ordering};

/// Interrupt-driven encoder line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Quadrature phase A
    PhaseA,
    /// Push button
    Button,
}

/// Debounce cycle state of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    /// No timer armed; the next edge starts a cycle
    Idle,
    /// A debounce timer is armed for this line
    Armed,
}

/// Per-line pending flag
///
/// Guarantees at most one armed timer per line. The interrupt handler
/// claims the gate, the timer callback releases it; nothing else touches
/// it, so the pair never needs a lock.
#[derive(Debug, Default)]
pub struct LineGate {
    pending: AtomicBool,
}

impl LineGate {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Try to start a debounce cycle
    ///
    /// Returns `true` if the gate was idle and is now armed. The caller
    /// then owns the cycle and must arm the timer.
    pub fn try_arm(&self) -> bool {
        !self.pending.swap(true, Ordering::AcqRel)
    }

    /// End the current debounce cycle
    pub fn release(&self) {
        self.pending.store(false, Ordering::Release);
    }

    pub fn state(&self) -> GateState {
        if self.pending.load(Ordering::Acquire) {
            GateState::Armed
        } else {
            GateState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_cycle() {
        let gate = LineGate::new();
        assert_eq!(gate.state(), GateState::Idle);

        assert!(gate.try_arm());
        assert_eq!(gate.state(), GateState::Armed);

        // Second edge inside the window does not re-arm
        assert!(!gate.try_arm());
        assert!(!gate.try_arm());

        gate.release();
        assert_eq!(gate.state(), GateState::Idle);
        assert!(gate.try_arm());
    }
}
