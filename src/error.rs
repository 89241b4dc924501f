//! Unified error types for the SIMOKA monitor.
//!
//! Two families live here. **Per-sensor faults** ([`SensorError`],
//! [`ClassifyError`]) are recovered by the processor and turned into an
//! `Unavailable` report for that one sensor. **Structural faults** (unknown
//! or duplicate sensors, rejected input, bad configuration) funnel into the
//! top-level [`Error`] and always escalate to the caller.  [`RangeError`]
//! surfaces while a configuration is being parsed.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every structural failure in the crate funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// A request named a sensor that is not registered.
    UnknownSensor(String),
    /// A sensor with the same name is already registered.
    DuplicateSensor(String),
    /// The sensor exists but has no simulated channel to drive.
    NotSimulated(String),
    /// A caller-supplied value was rejected.
    InvalidInput(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSensor(name) => write!(f, "unknown sensor '{name}'"),
            Self::DuplicateSensor(name) => write!(f, "sensor '{name}' already registered"),
            Self::NotSimulated(name) => write!(f, "sensor '{name}' is not simulated"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// A sensor source is unavailable or faulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// The analog channel reports no probe attached.
    Disconnected,
    /// Raw signal (millivolts) is outside the converter's plausible window.
    SignalOutOfRange(f64),
    /// The read did not complete within the configured timeout.
    Timeout,
    /// No worker thread could be spawned for the read.
    WorkerFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "probe disconnected"),
            Self::SignalOutOfRange(mv) => write!(f, "signal out of range ({mv:.1} mV)"),
            Self::Timeout => write!(f, "read timed out"),
            Self::WorkerFailed => write!(f, "read worker failed"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Classification errors
// ---------------------------------------------------------------------------

/// A value the classifier refuses to place in any band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassifyError {
    /// The value handed to the classifier is NaN or infinite.
    InvalidReading(f64),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReading(v) => write!(f, "invalid reading {v}"),
        }
    }
}

impl std::error::Error for ClassifyError {}

// ---------------------------------------------------------------------------
// Safe range errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeError {
    /// `min`, `max` or the margin is NaN or infinite.
    NonFinite,
    /// `min` is not strictly below `max`.
    Inverted { min: f64, max: f64 },
    /// Margin is negative or at least half the span.
    MarginOutOfBounds { margin: f64, limit: f64 },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "bounds must be finite"),
            Self::Inverted { min, max } => write!(f, "min {min} must be below max {max}"),
            Self::MarginOutOfBounds { margin, limit } => {
                write!(f, "warning margin {margin} must be in [0, {limit})")
            }
        }
    }
}

impl std::error::Error for RangeError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
