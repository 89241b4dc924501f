//! Galvanic dissolved-oxygen probe.
//!
//! Output is linear in oxygen partial pressure.  The probe is treated as
//! calibrated in air-saturated fresh water at 25 C: the calibration voltage
//! maps to the saturation concentration at that temperature.

use crate::error::SensorError;
use crate::range::SafeRange;

use super::channel::{AnalogChannel, check_window};
use super::{Sensor, SensorKind};

pub const UNIT: &str = "mg/L";

const MIN_MV: f64 = 0.0;
const MAX_MV: f64 = 3000.0;

/// Probe output in air-saturated water.
const SATURATION_MV: f64 = 1300.0;
/// Saturation concentration at the calibration temperature.
const SATURATION_MG_L: f64 = 8.26;

pub struct DissolvedOxygenSensor {
    name: String,
    range: SafeRange,
    channel: AnalogChannel,
}

impl DissolvedOxygenSensor {
    pub fn new(name: String, range: SafeRange, channel: AnalogChannel) -> Self {
        Self {
            name,
            range,
            channel,
        }
    }

    fn mv_to_mg_l(mv: f64) -> f64 {
        mv / SATURATION_MV * SATURATION_MG_L
    }
}

impl Sensor for DissolvedOxygenSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::DissolvedOxygen
    }

    fn unit(&self) -> &'static str {
        UNIT
    }

    fn safe_range(&self) -> SafeRange {
        self.range
    }

    fn read_value(&self) -> Result<f64, SensorError> {
        let mv = check_window(self.channel.sample()?, MIN_MV, MAX_MV)?;
        Ok(Self::mv_to_mg_l(mv))
    }
}
