//! Sensor subsystem: the [`Sensor`] capability and its probe variants.
//!
//! Each variant owns its name, unit, safe range and an [`AnalogChannel`]
//! it samples.  Raw millivolts are converted to engineering units inside
//! the variant; the processor only ever sees finite values or a
//! [`SensorError`].

pub mod channel;
pub mod dissolved_oxygen;
pub mod ph;
pub mod temperature;
pub mod turbidity;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SensorError;
use crate::range::SafeRange;

pub use channel::AnalogChannel;
use dissolved_oxygen::DissolvedOxygenSensor;
use ph::PhSensor;
use temperature::TemperatureSensor;
use turbidity::TurbiditySensor;

/// Read-side capability every probe implements.
///
/// Implementations must be `Send + Sync`: the concurrent processor reads
/// each sensor from its own worker thread.
pub trait Sensor: Send + Sync {
    /// Unique identifier within a registry.
    fn name(&self) -> &str;

    fn kind(&self) -> SensorKind;

    /// Unit label, e.g. `"pH"` or `"NTU"`.
    fn unit(&self) -> &'static str;

    fn safe_range(&self) -> SafeRange;

    /// Sample the probe and return a finite value in [`Sensor::unit`].
    fn read_value(&self) -> Result<f64, SensorError>;

    /// Sample the probe and stamp the result.
    fn read(&self) -> Result<SensorReading, SensorError> {
        let value = self.read_value()?;
        Ok(SensorReading {
            sensor_name: self.name().to_owned(),
            value,
            unit: self.unit(),
            timestamp: Utc::now(),
        })
    }
}

/// One timestamped sample.  Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub sensor_name: String,
    pub value: f64,
    pub unit: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Probe variants the monitor knows how to build from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Ph,
    Turbidity,
    Temperature,
    DissolvedOxygen,
}

impl SensorKind {
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Ph => ph::UNIT,
            Self::Turbidity => turbidity::UNIT,
            Self::Temperature => temperature::UNIT,
            Self::DissolvedOxygen => dissolved_oxygen::UNIT,
        }
    }
}

/// Build a probe of `kind` sampling `channel`.
pub fn build(
    kind: SensorKind,
    name: impl Into<String>,
    range: SafeRange,
    channel: AnalogChannel,
) -> Arc<dyn Sensor> {
    let name = name.into();
    match kind {
        SensorKind::Ph => Arc::new(PhSensor::new(name, range, channel)),
        SensorKind::Turbidity => Arc::new(TurbiditySensor::new(name, range, channel)),
        SensorKind::Temperature => Arc::new(TemperatureSensor::new(name, range, channel)),
        SensorKind::DissolvedOxygen => {
            Arc::new(DissolvedOxygenSensor::new(name, range, channel))
        }
    }
}
