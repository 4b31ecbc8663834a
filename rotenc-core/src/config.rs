//! Encoder configuration
//!
//! Everything that used to be a compiled-in constant (debounce delay,
//! detent count, speed fallback) is a field here and validated once at
//! initialization.

use rotenc_hal::PinId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::listener::EncoderId;

/// Detents per revolution of a typical 24-step mechanical encoder
pub const DEFAULT_DETENTS_PER_REVOLUTION: u16 = 24;

/// Settle time before a line is re-sampled (µs)
pub const DEFAULT_DEBOUNCE_US: u32 = 250;

/// Per-edge interval assumed when the clock has not advanced (ms)
pub const DEFAULT_FALLBACK_INTERVAL_MS: u32 = 50;

/// Encoder driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Source identity passed to the listener
    #[cfg_attr(feature = "serde", serde(with = "encoder_id"))]
    pub id: EncoderId,
    /// Quadrature phase A (interrupt-driven)
    #[cfg_attr(feature = "serde", serde(with = "pin_id"))]
    pub phase_a: PinId,
    /// Quadrature phase B (sampled on phase A edges)
    #[cfg_attr(feature = "serde", serde(with = "pin_id"))]
    pub phase_b: PinId,
    /// Push button (interrupt-driven, active low)
    #[cfg_attr(feature = "serde", serde(with = "pin_id"))]
    pub button: PinId,
    /// Mechanical detents per full revolution
    pub detents_per_revolution: u16,
    /// Debounce delay shared by all lines (µs)
    pub debounce_us: u32,
    /// Fallback per-edge interval for speed estimation (ms)
    pub fallback_interval_ms: u32,
}

impl EncoderConfig {
    /// Configuration with the given pins and default timings
    pub const fn new(phase_a: PinId, phase_b: PinId, button: PinId) -> Self {
        Self {
            id: EncoderId(0),
            phase_a,
            phase_b,
            button,
            detents_per_revolution: DEFAULT_DETENTS_PER_REVOLUTION,
            debounce_us: DEFAULT_DEBOUNCE_US,
            fallback_interval_ms: DEFAULT_FALLBACK_INTERVAL_MS,
        }
    }

    /// Set the source identity
    pub const fn with_id(mut self, id: EncoderId) -> Self {
        self.id = id;
        self
    }

    /// Set the detent count
    pub const fn with_detents(mut self, detents: u16) -> Self {
        self.detents_per_revolution = detents;
        self
    }

    /// Set the debounce delay
    pub const fn with_debounce_us(mut self, debounce_us: u32) -> Self {
        self.debounce_us = debounce_us;
        self
    }

    /// Check the configuration for values the driver cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detents_per_revolution == 0 {
            return Err(ConfigError::ZeroDetents);
        }
        if self.debounce_us == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.fallback_interval_ms == 0 {
            return Err(ConfigError::ZeroFallbackInterval);
        }

        let pins = [self.phase_a, self.phase_b, self.button];
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod pin_id {
    use rotenc_hal::PinId;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pin: &PinId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(pin.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PinId, D::Error> {
        u8::deserialize(d).map(PinId)
    }
}

#[cfg(feature = "serde")]
mod encoder_id {
    use crate::listener::EncoderId;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &EncoderId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(id.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<EncoderId, D::Error> {
        u8::deserialize(d).map(EncoderId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EncoderConfig {
        EncoderConfig::new(PinId(2), PinId(3), PinId(4))
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.detents_per_revolution, 24);
        assert_eq!(config.debounce_us, 250);
        assert_eq!(config.fallback_interval_ms, 50);
        assert_eq!(config.id, EncoderId(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = config()
            .with_id(EncoderId(3))
            .with_detents(20)
            .with_debounce_us(500);
        assert_eq!(config.id, EncoderId(3));
        assert_eq!(config.detents_per_revolution, 20);
        assert_eq!(config.debounce_us, 500);
    }

    #[test]
    fn test_rejects_zero_values() {
        assert_eq!(
            config().with_detents(0).validate(),
            Err(ConfigError::ZeroDetents)
        );
        assert_eq!(
            config().with_debounce_us(0).validate(),
            Err(ConfigError::ZeroDebounce)
        );

        let mut config = config();
        config.fallback_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFallbackInterval));
    }

    #[test]
    fn test_rejects_shared_pins() {
        let config = EncoderConfig::new(PinId(2), PinId(3), PinId(2));
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin(PinId(2))));

        let config = EncoderConfig::new(PinId(2), PinId(5), PinId(5));
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin(PinId(5))));
    }
}
