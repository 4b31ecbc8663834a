//! rotenc - Rotary Encoder Demo Firmware
//!
//! Demo binary for RP2040 boards: a debounced quadrature encoder with push
//! button drives a 128x32 SSD1306 dashboard showing speed, direction and a
//! position indicator.
//!
//! # Tasks
//!
//! - `phase_a_task` / `button_task`: edge capture and debounce per line
//! - `poll_task`: drains the encoder state into events
//! - `display_task`: renders events on the OLED

#![no_std]
#![no_main]

mod channels;
mod framebuffer;
mod ssd1306;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rotenc_core::{initialize, EncoderConfig, EncoderHardware, EncoderState, RotaryEncoder};
use rotenc_display::Dashboard;
use rotenc_hal_rp2040::{DeadlineTimers, EmbassyClock, RpGpio};

use crate::ssd1306::{Ssd1306, SSD1306_ADDR};
use crate::tasks::ChannelListener;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Board wiring and timings
mod board {
    use rotenc_hal::PinId;

    /// Encoder phase A (interrupt-driven)
    pub const PHASE_A: PinId = PinId(2);
    /// Encoder phase B (sampled)
    pub const PHASE_B: PinId = PinId(3);
    /// Encoder push button
    pub const BUTTON: PinId = PinId(4);

    /// Detents per revolution of the fitted encoder
    pub const DETENTS_PER_REVOLUTION: u16 = 24;
    /// Debounce delay (µs)
    pub const DEBOUNCE_US: u32 = 250;

    /// OLED I2C bus frequency
    pub const I2C_FREQUENCY_HZ: u32 = 400_000;

    /// One-shot timers available to the encoder
    pub const TIMER_SLOTS: u8 = 2;
}

/// Dashboard header lines
const TITLE: &str = "rot-enc-test";
const SUBTITLE: &str = concat!("rotenc v", env!("CARGO_PKG_VERSION"));

const ENCODER_CONFIG: EncoderConfig =
    EncoderConfig::new(board::PHASE_A, board::PHASE_B, board::BUTTON)
        .with_detents(board::DETENTS_PER_REVOLUTION)
        .with_debounce_us(board::DEBOUNCE_US);

// Shared encoder state (must live forever for task references)
static ENCODER_STATE: StaticCell<EncoderState> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("rotenc firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup I2C for OLED (GPIO8=SDA, GPIO9=SCL)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_9, p.PIN_8, Irqs, i2c_config);

    // Initialize OLED display
    let mut oled = Ssd1306::new(i2c, SSD1306_ADDR);
    if let Err(e) = oled.init().await {
        error!("SSD1306 init failed: {:?}", e);
        core::panic!("display unavailable");
    }
    info!("OLED initialized");

    // Hand the encoder pins to the pin bank
    let mut gpio = RpGpio::new();
    let provided = [
        gpio.provide(board::PHASE_A.0, p.PIN_2.into()),
        gpio.provide(board::PHASE_B.0, p.PIN_3.into()),
        gpio.provide(board::BUTTON.0, p.PIN_4.into()),
    ];
    if let Some(Err(e)) = provided.into_iter().find(Result::is_err) {
        error!("Pin bank setup failed: {:?}", e);
        core::panic!("pin bank setup failed");
    }

    // Configure pins, edge detection and debounce timers
    let mut timers = DeadlineTimers::new(board::TIMER_SLOTS);
    let hardware = match initialize(&ENCODER_CONFIG, &mut gpio, &mut timers) {
        Ok(hardware) => hardware,
        Err(e) => {
            error!("Encoder init failed: {}", e);
            core::panic!("encoder init failed");
        }
    };
    info!(
        "Encoder initialized: {} detents, {}us debounce",
        ENCODER_CONFIG.detents_per_revolution, ENCODER_CONFIG.debounce_us
    );

    let state: &'static EncoderState =
        ENCODER_STATE.init(EncoderState::for_config(&ENCODER_CONFIG));
    let encoder = RotaryEncoder::new(&ENCODER_CONFIG, state, EmbassyClock, ChannelListener);

    let EncoderHardware {
        phase_a,
        phase_b,
        button,
        phase_a_timer,
        button_timer,
    } = hardware;

    // Spawn tasks
    spawner
        .spawn(tasks::phase_a_task(state, phase_a, phase_b, phase_a_timer))
        .unwrap();
    spawner
        .spawn(tasks::button_task(state, button, button_timer))
        .unwrap();
    spawner.spawn(tasks::poll_task(encoder)).unwrap();
    spawner
        .spawn(tasks::display_task(oled, Dashboard::new(TITLE, SUBTITLE)))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
