//! GPIO pin abstractions
//!
//! Provides traits for digital input pins and for the one-time setup a
//! chip HAL performs before edge interrupts can be delivered.

use core::fmt;

/// GPIO pin number as understood by the chip HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gpio{}", self.0)
    }
}

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital input pin
///
/// Reads must be cheap and side-effect free: they are issued from
/// interrupt and timer-callback context.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Current logic level
    fn level(&self) -> Level {
        Level::from(self.is_high())
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// Pin configuration and interrupt registration
///
/// Used once at driver initialization. Implementations hand out the
/// configured input and route falling edges of a registered pin to
/// whatever dispatch mechanism the platform uses (interrupt vector,
/// async task, ...).
pub trait GpioController {
    /// Input pin type produced by this controller
    type Input: InputPin;

    /// Error type for configuration failures
    type Error;

    /// Configure `pin` as a digital input with the internal pull-up enabled
    fn input_pull_up(&mut self, pin: PinId) -> Result<Self::Input, Self::Error>;

    /// Register a falling-edge interrupt on an already configured input
    fn listen_falling_edge(&mut self, pin: PinId) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakePin {
        high: Cell<bool>,
    }

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.high.get()
        }
    }

    #[test]
    fn test_level_follows_pin() {
        let pin = FakePin {
            high: Cell::new(true),
        };
        assert_eq!(pin.level(), Level::High);
        assert!(!pin.is_low());

        pin.high.set(false);
        assert_eq!(pin.level(), Level::Low);
        assert!((&pin).is_low());
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }
}
