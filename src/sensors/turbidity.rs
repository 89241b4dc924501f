//! Optical turbidity module (analog output, 0–4.5 V).
//!
//! Clear water reads about 4.2 V; the output falls as suspended particles
//! scatter more light.  The vendor's quadratic fit converts volts to NTU
//! and goes negative above ~4.2 V, so the result is clamped at zero.

use crate::error::SensorError;
use crate::range::SafeRange;

use super::channel::{AnalogChannel, check_window};
use super::{Sensor, SensorKind};

pub const UNIT: &str = "NTU";

const A: f64 = -1120.4;
const B: f64 = 5742.3;
const C: f64 = -4352.9;
/// Below 2.5 V the quadratic fit is no longer valid.
const MIN_MV: f64 = 2500.0;
const MAX_MV: f64 = 4500.0;

pub struct TurbiditySensor {
    name: String,
    range: SafeRange,
    channel: AnalogChannel,
}

impl TurbiditySensor {
    pub fn new(name: String, range: SafeRange, channel: AnalogChannel) -> Self {
        Self {
            name,
            range,
            channel,
        }
    }

    /// Convert a module output (millivolts) to NTU.
    pub fn mv_to_ntu(mv: f64) -> f64 {
        let v = mv / 1000.0;
        (A * v * v + B * v + C).max(0.0)
    }
}

impl Sensor for TurbiditySensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Turbidity
    }

    fn unit(&self) -> &'static str {
        UNIT
    }

    fn safe_range(&self) -> SafeRange {
        self.range
    }

    fn read_value(&self) -> Result<f64, SensorError> {
        let mv = check_window(self.channel.sample()?, MIN_MV, MAX_MV)?;
        Ok(Self::mv_to_ntu(mv))
    }
}
