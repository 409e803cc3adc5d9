//! Engine configuration
//!
//! The divider is the only timing input the engine consumes. It is fixed for
//! the duration of a transaction and may be replaced between transactions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Divider used when none is configured
pub const DEFAULT_DIVIDER: u32 = 3;

/// Bus timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Wait units per bit-period phase; a bit-period is `divider * 5` units
    pub divider: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            divider: DEFAULT_DIVIDER,
        }
    }
}

/// Problems [`BusConfig::validate`] can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A zero divider collapses every wait to nothing
    ZeroDivider,
}

impl BusConfig {
    /// Create a configuration with the given divider
    pub const fn new(divider: u32) -> Self {
        Self { divider }
    }

    /// Check the configuration for values that defeat bus timing
    ///
    /// The engine accepts any divider; this is for callers that want to
    /// reject a bad configuration before handing it over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.divider == 0 {
            return Err(ConfigError::ZeroDivider);
        }
        Ok(())
    }
}

/// What a transaction does when a written byte is not acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NackPolicy {
    /// Report the failure and keep clocking out the remaining bytes
    ///
    /// The transaction still ends with its requested stop or repeated start.
    #[default]
    Continue,
    /// Report the failure, issue a stop and return [`crate::Error::Nack`]
    Abort,
}
