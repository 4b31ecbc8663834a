//! Error types for the encoder driver
//!
//! Only initialization can fail. Once running, every decision (confirm or
//! reject an edge, direction sign) is deterministic given the sampled
//! levels, and a rejected bounce is simply dropped.

use core::fmt;

use rotenc_hal::PinId;

/// Invalid driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Detents per revolution must be non-zero
    ZeroDetents,
    /// Debounce delay must be non-zero
    ZeroDebounce,
    /// Speed fallback interval must be non-zero
    ZeroFallbackInterval,
    /// The same GPIO was assigned to more than one line
    DuplicatePin(PinId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDetents => write!(f, "detents per revolution must be non-zero"),
            ConfigError::ZeroDebounce => write!(f, "debounce delay must be non-zero"),
            ConfigError::ZeroFallbackInterval => {
                write!(f, "fallback interval must be non-zero")
            }
            ConfigError::DuplicatePin(pin) => write!(f, "{} assigned to more than one line", pin),
        }
    }
}

/// Driver initialization failure
///
/// `G` is the platform's GPIO error, `T` its timer allocation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<G, T> {
    /// Configuration rejected before touching hardware
    Config(ConfigError),
    /// Pin configuration or interrupt registration failed
    Gpio(G),
    /// A debounce timer could not be allocated
    Timer(T),
}

impl<G, T> From<ConfigError> for InitError<G, T> {
    fn from(error: ConfigError) -> Self {
        InitError::Config(error)
    }
}

impl<G: fmt::Debug, T: fmt::Debug> fmt::Display for InitError<G, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Config(e) => write!(f, "invalid configuration: {}", e),
            InitError::Gpio(e) => write!(f, "GPIO setup failed: {:?}", e),
            InitError::Timer(e) => write!(f, "timer allocation failed: {:?}", e),
        }
    }
}
