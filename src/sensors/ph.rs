//! Glass-electrode pH probe behind a high-impedance amplifier.
//!
//! The electrode produces roughly 0 mV at pH 7 and loses 59.16 mV per pH
//! unit at 25 C.

use crate::error::SensorError;
use crate::range::SafeRange;

use super::channel::{AnalogChannel, check_window};
use super::{Sensor, SensorKind};

pub const UNIT: &str = "pH";

/// Nernst slope at 25 C (mV per pH unit).
const SLOPE_MV_PER_PH: f64 = 59.16;
const NEUTRAL_PH: f64 = 7.0;
const MIN_MV: f64 = -1000.0;
const MAX_MV: f64 = 1000.0;

pub struct PhSensor {
    name: String,
    range: SafeRange,
    channel: AnalogChannel,
}

impl PhSensor {
    pub fn new(name: String, range: SafeRange, channel: AnalogChannel) -> Self {
        Self {
            name,
            range,
            channel,
        }
    }

    /// Millivolts the probe would output at `ph`.
    pub fn millivolts_for(ph: f64) -> f64 {
        (NEUTRAL_PH - ph) * SLOPE_MV_PER_PH
    }

    fn mv_to_ph(mv: f64) -> f64 {
        NEUTRAL_PH - mv / SLOPE_MV_PER_PH
    }
}

impl Sensor for PhSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Ph
    }

    fn unit(&self) -> &'static str {
        UNIT
    }

    fn safe_range(&self) -> SafeRange {
        self.range
    }

    fn read_value(&self) -> Result<f64, SensorError> {
        let mv = check_window(self.channel.sample()?, MIN_MV, MAX_MV)?;
        Ok(Self::mv_to_ph(mv))
    }
}
