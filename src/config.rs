//! System configuration parameters
//!
//! All tunable parameters for the SIMOKA monitor: the gateway bind
//! address, read fan-out timing and the sensor set with its safe ranges.
//! Values are loaded through [`ConfigPort`](crate::app::ports::ConfigPort);
//! a missing file yields [`SystemConfig::default()`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::range::SafeRange;
use crate::sensors::SensorKind;
use crate::sensors::ph::PhSensor;

/// One configured probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConfig {
    /// Unique sensor identifier, used in requests.
    pub name: String,
    pub kind: SensorKind,
    pub safe_range: SafeRange,
    /// Initial simulated input on the probe's analog channel.
    pub millivolts: f64,
}

impl SensorConfig {
    fn new(name: &str, kind: SensorKind, range: (f64, f64, f64), millivolts: f64) -> Self {
        let (min, max, margin) = range;
        Self {
            name: name.to_owned(),
            kind,
            // Built-in defaults are known-valid; validate() re-checks loaded ones.
            safe_range: SafeRange::new(min, max, margin)
                .unwrap_or_else(|e| panic!("built-in range for {name} invalid: {e}")),
            millivolts,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemConfig {
    // --- Gateway ---
    /// HTTP listen address
    pub bind_addr: String,

    // --- Read fan-out ---
    /// Per-read deadline for concurrent processing (milliseconds)
    pub read_timeout_ms: u64,
    /// How often pending reads are polled (milliseconds)
    pub poll_interval_ms: u64,

    // --- Sensors ---
    pub sensors: Vec<SensorConfig>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_owned(),

            read_timeout_ms: 500,
            poll_interval_ms: 5,

            sensors: vec![
                SensorConfig::new(
                    "ph",
                    SensorKind::Ph,
                    (6.5, 8.5, 0.5),
                    PhSensor::millivolts_for(7.2),
                ),
                // ~0.9 NTU
                SensorConfig::new("turbidity", SensorKind::Turbidity, (0.0, 5.0, 2.0), 4200.0),
                // 25 C
                SensorConfig::new(
                    "temperature",
                    SensorKind::Temperature,
                    (20.0, 30.0, 3.0),
                    1650.0,
                ),
                // 8.26 mg/L
                SensorConfig::new(
                    "dissolved_oxygen",
                    SensorKind::DissolvedOxygen,
                    (5.0, 12.0, 1.0),
                    1300.0,
                ),
            ],
        }
    }
}

impl SystemConfig {
    /// Reject values the monitor cannot run with.
    ///
    /// Safe ranges are already validated on construction and
    /// deserialization, so only cross-field rules are checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("bindAddr must not be empty"));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("readTimeoutMs must be > 0"));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms >= self.read_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "pollIntervalMs must be > 0 and below readTimeoutMs",
            ));
        }
        let mut seen = HashSet::new();
        for sensor in &self.sensors {
            if sensor.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed("sensor name must not be empty"));
            }
            if !seen.insert(sensor.name.as_str()) {
                return Err(ConfigError::ValidationFailed("sensor names must be unique"));
            }
            if !sensor.millivolts.is_finite() {
                return Err(ConfigError::ValidationFailed("sensor millivolts must be finite"));
            }
        }
        Ok(())
    }
}
