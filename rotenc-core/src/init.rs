//! Driver initialization
//!
//! Validates the configuration, sets up the three GPIOs, registers the two
//! edge interrupts and allocates the two debounce timers. Every platform
//! failure is surfaced instead of leaving the driver half-wired.

use rotenc_hal::{GpioController, InputPin, OneShotTimer, TimerService};

use crate::config::EncoderConfig;
use crate::error::InitError;
use crate::line::Line;
use crate::state::EncoderState;

/// Configured pins and timers of one encoder
///
/// Fields are public so platform glue can split them between interrupt
/// handlers or tasks; [`handle_edge`](Self::handle_edge) and
/// [`handle_settled`](Self::handle_settled) cover platforms that keep them
/// together.
pub struct EncoderHardware<P, T> {
    /// Phase A input (edge interrupt registered)
    pub phase_a: P,
    /// Phase B input (sampled only)
    pub phase_b: P,
    /// Button input (edge interrupt registered)
    pub button: P,
    /// Debounce timer for phase A
    pub phase_a_timer: T,
    /// Debounce timer for the button
    pub button_timer: T,
}

impl<P: InputPin, T: OneShotTimer> EncoderHardware<P, T> {
    /// Route a falling-edge interrupt to edge capture
    pub fn handle_edge(&self, state: &EncoderState, line: Line) {
        match line {
            Line::PhaseA => state.on_phase_a_edge(&self.phase_b, &self.phase_a_timer),
            Line::Button => state.on_button_edge(&self.button_timer),
        }
    }

    /// Route a debounce timer expiry to the resolver
    pub fn handle_settled(&self, state: &EncoderState, line: Line) {
        match line {
            Line::PhaseA => state.on_phase_a_settled(&self.phase_a),
            Line::Button => state.on_button_settled(&self.button),
        }
    }
}

/// Bring up the encoder hardware
///
/// Order: validate, configure all inputs with pull-ups, register falling
/// edges on phase A and the button, then create the timers. The returned
/// [`EncoderHardware`] is used together with an [`EncoderState`] created
/// from the same configuration.
pub fn initialize<G, S>(
    config: &EncoderConfig,
    gpio: &mut G,
    timers: &mut S,
) -> Result<EncoderHardware<G::Input, S::Timer>, InitError<G::Error, S::Error>>
where
    G: GpioController,
    S: TimerService,
{
    config.validate()?;

    let phase_a = gpio.input_pull_up(config.phase_a).map_err(InitError::Gpio)?;
    let phase_b = gpio.input_pull_up(config.phase_b).map_err(InitError::Gpio)?;
    let button = gpio.input_pull_up(config.button).map_err(InitError::Gpio)?;

    gpio.listen_falling_edge(config.phase_a)
        .map_err(InitError::Gpio)?;
    gpio.listen_falling_edge(config.button)
        .map_err(InitError::Gpio)?;

    let phase_a_timer = timers.create_one_shot().map_err(InitError::Timer)?;
    let button_timer = timers.create_one_shot().map_err(InitError::Timer)?;

    Ok(EncoderHardware {
        phase_a,
        phase_b,
        button,
        phase_a_timer,
        button_timer,
    })
}
