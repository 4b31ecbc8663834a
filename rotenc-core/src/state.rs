//! Shared encoder state: edge capture, debounce resolution, aggregation
//!
//! [`EncoderState`] is the only block touched from more than one execution
//! context:
//!
//! | Context          | Calls                                   | Writes                        |
//! |------------------|-----------------------------------------|-------------------------------|
//! | Interrupt        | `on_phase_a_edge`, `on_button_edge`     | pending flag, companion latch |
//! | Timer callback   | `on_phase_a_settled`, `on_button_settled` | pending flag, counters        |
//! | Polling          | `drain_rotation`, `take_click`          | counters (read-and-clear)     |
//!
//! Every field is an atomic, so the block is `Sync` and can live in a
//! `static`. Edge handlers never block, allocate, or loop.

use portable_atomic::{AtomicBool, Ordering};
use rotenc_hal::{InputPin, OneShotTimer};

use crate::config::EncoderConfig;
use crate::counter::{Direction, RotationCounter, RotationSample};
use crate::line::{GateState, Line, LineGate};

/// Accumulated encoder state shared across execution contexts
#[derive(Debug)]
pub struct EncoderState {
    /// Debounce delay passed to every timer arm (µs)
    debounce_us: u32,
    phase_a: LineGate,
    button: LineGate,
    /// Phase B read low when the in-flight phase A edge was sensed
    companion_low: AtomicBool,
    rotation: RotationCounter,
    clicked: AtomicBool,
}

impl EncoderState {
    /// Create an idle state block
    pub const fn new(debounce_us: u32) -> Self {
        Self {
            debounce_us,
            phase_a: LineGate::new(),
            button: LineGate::new(),
            companion_low: AtomicBool::new(false),
            rotation: RotationCounter::new(),
            clicked: AtomicBool::new(false),
        }
    }

    /// Create the shared state for `config`
    pub const fn for_config(config: &EncoderConfig) -> Self {
        Self::new(config.debounce_us)
    }

    /// Debounce delay used when arming timers (µs)
    pub fn debounce_us(&self) -> u32 {
        self.debounce_us
    }

    // -----------------------------------------------------------------------
    // Edge capture (interrupt context)
    // -----------------------------------------------------------------------

    /// Falling edge sensed on phase A
    ///
    /// Starts a debounce cycle unless one is already in flight. The
    /// companion phase is latched now: by the time the timer fires it may
    /// already have moved on.
    pub fn on_phase_a_edge<B, T>(&self, phase_b: &B, timer: &T)
    where
        B: InputPin,
        T: OneShotTimer,
    {
        if self.phase_a.try_arm() {
            self.companion_low.store(phase_b.is_low(), Ordering::Release);
            timer.arm_once(self.debounce_us);
        }
    }

    /// Falling edge sensed on the button line
    pub fn on_button_edge<T: OneShotTimer>(&self, timer: &T) {
        if self.button.try_arm() {
            timer.arm_once(self.debounce_us);
        }
    }

    // -----------------------------------------------------------------------
    // Debounce resolution (timer-callback context)
    // -----------------------------------------------------------------------

    /// Debounce delay for phase A elapsed
    ///
    /// The edge is genuine if the line is still asserted (low). The gate is
    /// released either way, but only after the line and the companion latch
    /// have been read: a new edge may re-latch as soon as the gate opens.
    pub fn on_phase_a_settled<A: InputPin>(&self, phase_a: &A) {
        let confirmed = phase_a.is_low();
        let companion_low = self.companion_low.load(Ordering::Acquire);
        self.phase_a.release();

        if confirmed {
            let direction = if companion_low {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            // A saturated counter drops the edge until the next drain
            let _ = self.rotation.record(direction);
        }
    }

    /// Debounce delay for the button elapsed
    pub fn on_button_settled<P: InputPin>(&self, button: &P) {
        self.button.release();

        if button.is_low() {
            self.clicked.store(true, Ordering::Release);
        }
    }

    // -----------------------------------------------------------------------
    // Drain (polling context)
    // -----------------------------------------------------------------------

    /// Take all confirmed phase A edges accumulated since the last drain
    pub fn drain_rotation(&self) -> Option<RotationSample> {
        self.rotation.drain()
    }

    /// Take the pending click, if any
    pub fn take_click(&self) -> bool {
        self.clicked.swap(false, Ordering::AcqRel)
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Debounce cycle state of a line
    pub fn gate_state(&self, line: Line) -> GateState {
        match line {
            Line::PhaseA => self.phase_a.state(),
            Line::Button => self.button.state(),
        }
    }

    /// Confirmed phase A edges not yet drained
    pub fn pending_rotation(&self) -> RotationSample {
        self.rotation.peek()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockPin {
        low: Cell<bool>,
    }

    impl MockPin {
        fn new(low: bool) -> Self {
            Self {
                low: Cell::new(low),
            }
        }

        fn set_low(&self, low: bool) {
            self.low.set(low);
        }
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            !self.low.get()
        }
    }

    #[derive(Default)]
    struct MockTimer {
        arms: Cell<u32>,
        last_delay_us: Cell<u32>,
    }

    impl OneShotTimer for MockTimer {
        fn arm_once(&self, delay_us: u32) {
            self.arms.set(self.arms.get() + 1);
            self.last_delay_us.set(delay_us);
        }
    }

    #[test]
    fn test_phase_a_edge_arms_timer_once() {
        let state = EncoderState::new(250);
        let b = MockPin::new(true);
        let timer = MockTimer::default();

        state.on_phase_a_edge(&b, &timer);
        assert_eq!(timer.arms.get(), 1);
        assert_eq!(timer.last_delay_us.get(), 250);
        assert_eq!(state.gate_state(Line::PhaseA), GateState::Armed);

        // Bounces inside the window are ignored
        state.on_phase_a_edge(&b, &timer);
        state.on_phase_a_edge(&b, &timer);
        assert_eq!(timer.arms.get(), 1);
    }

    #[test]
    fn test_confirmed_edge_counts_once() {
        let state = EncoderState::new(250);
        let a = MockPin::new(true);
        let b = MockPin::new(false);
        let timer = MockTimer::default();

        state.on_phase_a_edge(&b, &timer);
        state.on_phase_a_edge(&b, &timer);
        state.on_phase_a_edge(&b, &timer);
        state.on_phase_a_settled(&a);

        assert_eq!(state.gate_state(Line::PhaseA), GateState::Idle);
        assert_eq!(
            state.drain_rotation(),
            Some(RotationSample {
                triggers: 1,
                delta: -1
            })
        );
    }

    #[test]
    fn test_bounce_is_discarded() {
        let state = EncoderState::new(250);
        let a = MockPin::new(false);
        let b = MockPin::new(true);
        let timer = MockTimer::default();

        state.on_phase_a_edge(&b, &timer);
        // Line went back high before the timer fired
        state.on_phase_a_settled(&a);

        assert_eq!(state.gate_state(Line::PhaseA), GateState::Idle);
        assert_eq!(state.drain_rotation(), None);
    }

    #[test]
    fn test_direction_follows_latched_companion() {
        let state = EncoderState::new(250);
        let a = MockPin::new(true);
        let b = MockPin::new(true);
        let timer = MockTimer::default();

        // B low at edge time -> clockwise, even though B is high by resolve time
        state.on_phase_a_edge(&b, &timer);
        b.set_low(false);
        state.on_phase_a_settled(&a);
        assert_eq!(state.pending_rotation().delta, 1);

        // B high at edge time -> counter-clockwise, even though B is low by resolve time
        b.set_low(false);
        state.on_phase_a_edge(&b, &timer);
        b.set_low(true);
        state.on_phase_a_settled(&a);

        assert_eq!(
            state.drain_rotation(),
            Some(RotationSample {
                triggers: 2,
                delta: 0
            })
        );
    }

    /// Phase A pin whose read is interrupted by another phase A edge
    struct PreemptedPin<'a> {
        state: &'a EncoderState,
        phase_b: &'a MockPin,
        timer: &'a MockTimer,
    }

    impl InputPin for PreemptedPin<'_> {
        fn is_high(&self) -> bool {
            self.state.on_phase_a_edge(self.phase_b, self.timer);
            false
        }
    }

    #[test]
    fn test_edge_during_resolve_keeps_latched_direction() {
        let state = EncoderState::new(250);
        let b = MockPin::new(true);
        let timer = MockTimer::default();

        // B low at edge time -> clockwise
        state.on_phase_a_edge(&b, &timer);

        // A new edge with B high lands while the first one resolves
        b.set_low(false);
        let a = PreemptedPin {
            state: &state,
            phase_b: &b,
            timer: &timer,
        };
        state.on_phase_a_settled(&a);

        assert_eq!(timer.arms.get(), 1);
        assert_eq!(state.gate_state(Line::PhaseA), GateState::Idle);
        assert_eq!(
            state.drain_rotation(),
            Some(RotationSample {
                triggers: 1,
                delta: 1
            })
        );

        // The next cycle latches afresh
        state.on_phase_a_edge(&b, &timer);
        state.on_phase_a_settled(&MockPin::new(true));
        assert_eq!(state.pending_rotation().delta, -1);
    }

    #[test]
    fn test_button_press_yields_single_click() {
        let state = EncoderState::new(250);
        let button = MockPin::new(true);
        let timer = MockTimer::default();

        for _ in 0..5 {
            state.on_button_edge(&timer);
        }
        state.on_button_settled(&button);

        assert_eq!(timer.arms.get(), 1);
        assert!(state.take_click());
        assert!(!state.take_click());
    }

    #[test]
    fn test_button_release_before_settle_is_not_a_click() {
        let state = EncoderState::new(250);
        let button = MockPin::new(false);
        let timer = MockTimer::default();

        state.on_button_edge(&timer);
        state.on_button_settled(&button);

        assert_eq!(state.gate_state(Line::Button), GateState::Idle);
        assert!(!state.take_click());
    }

    #[test]
    fn test_lines_debounce_independently() {
        let state = EncoderState::new(250);
        let b = MockPin::new(true);
        let a_timer = MockTimer::default();
        let button_timer = MockTimer::default();

        state.on_phase_a_edge(&b, &a_timer);
        state.on_button_edge(&button_timer);

        assert_eq!(a_timer.arms.get(), 1);
        assert_eq!(button_timer.arms.get(), 1);
        assert_eq!(state.gate_state(Line::PhaseA), GateState::Armed);
        assert_eq!(state.gate_state(Line::Button), GateState::Armed);
    }

    #[test]
    fn test_state_is_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<EncoderState>();
    }
}
