//! NTC thermistor water temperature probe (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor on a 3.3 V
//! rail. The simplified Beta (Steinhart-Hart) equation converts the
//! thermistor resistance to temperature.

use crate::error::SensorError;
use crate::range::SafeRange;

use super::channel::{AnalogChannel, check_window};
use super::{Sensor, SensorKind};

pub const UNIT: &str = "\u{00b0}C";

const R25: f64 = 10_000.0;
const BETA: f64 = 3950.0;
const T25_K: f64 = 298.15;
const R_DIVIDER: f64 = 10_000.0;
const V_REF_MV: f64 = 3300.0;
/// Rails are open / shorted thermistor.
const MIN_MV: f64 = 10.0;
const MAX_MV: f64 = V_REF_MV - 10.0;

pub struct TemperatureSensor {
    name: String,
    range: SafeRange,
    channel: AnalogChannel,
}

impl TemperatureSensor {
    pub fn new(name: String, range: SafeRange, channel: AnalogChannel) -> Self {
        Self {
            name,
            range,
            channel,
        }
    }

    /// Divider output (millivolts) to degrees Celsius.
    pub fn mv_to_celsius(mv: f64) -> f64 {
        let r_ntc = R_DIVIDER * mv / (V_REF_MV - mv);
        let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
        (1.0 / inv_t) - 273.15
    }
}

impl Sensor for TemperatureSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Temperature
    }

    fn unit(&self) -> &'static str {
        UNIT
    }

    fn safe_range(&self) -> SafeRange {
        self.range
    }

    fn read_value(&self) -> Result<f64, SensorError> {
        let mv = check_window(self.channel.sample()?, MIN_MV, MAX_MV)?;
        let celsius = Self::mv_to_celsius(mv);
        if celsius.is_finite() {
            Ok(celsius)
        } else {
            Err(SensorError::SignalOutOfRange(mv))
        }
    }
}
