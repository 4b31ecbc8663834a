//! Encoder line tasks
//!
//! One task per interrupt-driven line. Each task races the next falling
//! edge against its own debounce deadline: the edge branch plays the
//! interrupt handler, the deadline branch the timer callback.

use defmt::*;
use embassy_futures::select::{select, Either};

use rotenc_core::EncoderState;
use rotenc_hal_rp2040::{DeadlineTimer, RpInput};

/// Phase A edge capture and debounce
///
/// Phase B is only sampled, so it is owned here as well.
#[embassy_executor::task]
pub async fn phase_a_task(
    state: &'static EncoderState,
    mut phase_a: RpInput,
    phase_b: RpInput,
    timer: DeadlineTimer,
) {
    info!(
        "Phase A task started (A={}, B={})",
        phase_a.id().0,
        phase_b.id().0
    );

    loop {
        match select(phase_a.wait_for_falling_edge(), timer.fired()).await {
            Either::First(()) => state.on_phase_a_edge(&phase_b, &timer),
            Either::Second(()) => state.on_phase_a_settled(&phase_a),
        }
    }
}

/// Button edge capture and debounce
#[embassy_executor::task]
pub async fn button_task(state: &'static EncoderState, mut button: RpInput, timer: DeadlineTimer) {
    info!("Button task started (pin {})", button.id().0);

    loop {
        match select(button.wait_for_falling_edge(), timer.fired()).await {
            Either::First(()) => state.on_button_edge(&timer),
            Either::Second(()) => state.on_button_settled(&button),
        }
    }
}
