//! Unified error types for the alerting engine.
//!
//! The evaluation and publication paths have no failure modes of their own
//! (bad configuration values are reported through the notification channel,
//! sink failures come back as `bool`).  What remains is construction-time
//! misuse, funnelled into one `Copy` enum like every other subsystem.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The monitor rejected a sensor registration.
    Monitor(MonitorError),
    /// A configuration value could not be used.
    ConfigValue(ConfigValueError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monitor(e) => write!(f, "monitor: {e}"),
            Self::ConfigValue(e) => write!(f, "config value: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Monitor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorError {
    /// The fixed-capacity sensor list is full.
    CapacityExceeded,
    /// The measurement name would not fit in a configuration key.
    NameTooLong,
    /// A measurement with the same name is already monitored.
    DuplicateName,
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "sensor capacity exceeded"),
            Self::NameTooLong => write!(f, "measurement name too long"),
            Self::DuplicateName => write!(f, "duplicate measurement name"),
        }
    }
}

impl From<MonitorError> for Error {
    fn from(e: MonitorError) -> Self {
        Self::Monitor(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration value errors
// ---------------------------------------------------------------------------

/// Why a raw configuration string was not accepted as a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValueError {
    /// Not fully parseable as a decimal number.
    NotANumber,
    /// `<name>_<band>_<side>` does not fit a configuration key.
    KeyTooLong,
}

impl ConfigValueError {
    /// Operator-facing message carried in the notify event.
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotANumber => "Value is not a number.",
            Self::KeyTooLong => "Measurement name is too long for a configuration key.",
        }
    }
}

impl fmt::Display for ConfigValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<ConfigValueError> for Error {
    fn from(e: ConfigValueError) -> Self {
        Self::ConfigValue(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
