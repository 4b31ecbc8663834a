//! GPIO pin bank
//!
//! Pins are handed to the bank once at startup and taken back out by
//! number, so the encoder wiring can come from an `EncoderConfig` instead
//! of being hardcoded per board.

use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;
use rotenc_hal::{GpioController, InputPin, PinId};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin was never provided to the bank or was already taken
    Unavailable(u8),
    /// Edge detection requested on a pin that is not an input
    NotAnInput(u8),
}

/// Pin bank implementing [`GpioController`]
pub struct RpGpio {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
    /// Pins configured as inputs
    inputs: u32,
}

impl Default for RpGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl RpGpio {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            pins: core::array::from_fn(|_| None),
            inputs: 0,
        }
    }

    /// Hand a pin to the bank
    ///
    /// Usage:
    /// ```ignore
    /// gpio.provide(2, p.PIN_2.into())?;
    /// ```
    pub fn provide(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) -> Result<(), PinError> {
        let slot = self
            .pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin(pin_num))?;
        *slot = Some(pin);
        Ok(())
    }
}

impl GpioController for RpGpio {
    type Input = RpInput;
    type Error = PinError;

    fn input_pull_up(&mut self, pin: PinId) -> Result<Self::Input, Self::Error> {
        let slot = self
            .pins
            .get_mut(pin.0 as usize)
            .ok_or(PinError::InvalidPin(pin.0))?;
        let peri = slot.take().ok_or(PinError::Unavailable(pin.0))?;
        self.inputs |= 1 << pin.0;

        Ok(RpInput {
            id: pin,
            input: Input::new(peri, Pull::Up),
        })
    }

    fn listen_falling_edge(&mut self, pin: PinId) -> Result<(), Self::Error> {
        if pin.0 as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin(pin.0));
        }
        // The edge interrupt itself is enabled by awaiting the input
        if self.inputs & (1 << pin.0) == 0 {
            return Err(PinError::NotAnInput(pin.0));
        }
        Ok(())
    }
}

/// Pulled-up input pin
pub struct RpInput {
    id: PinId,
    input: Input<'static>,
}

impl RpInput {
    /// GPIO number of this input
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Wait for the next high-to-low transition
    pub async fn wait_for_falling_edge(&mut self) {
        self.input.wait_for_falling_edge().await
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
