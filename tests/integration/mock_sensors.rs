//! Scripted sensors and a recording event sink for integration tests.
//!
//! `ScriptedSensor` returns whatever its script says, so tests can
//! produce exact values, read failures, NaN and slow reads without going
//! through a probe's millivolt conversion.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use simoka::SafeRange;
use simoka::app::events::AppEvent;
use simoka::app::ports::EventSink;
use simoka::error::SensorError;
use simoka::sensors::{Sensor, SensorKind};

#[derive(Debug, Clone, Copy)]
pub enum Script {
    Value(f64),
    Fail(SensorError),
    Slow(f64, Duration),
}

pub struct ScriptedSensor {
    name: String,
    range: SafeRange,
    script: Script,
}

impl ScriptedSensor {
    pub fn new(name: &str, script: Script) -> Self {
        Self {
            name: name.to_owned(),
            range: SafeRange::new(6.5, 8.5, 0.5).unwrap(),
            script,
        }
    }

    pub fn arc(name: &str, script: Script) -> Arc<dyn Sensor> {
        Arc::new(Self::new(name, script))
    }
}

impl Sensor for ScriptedSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Ph
    }

    fn unit(&self) -> &'static str {
        "pH"
    }

    fn safe_range(&self) -> SafeRange {
        self.range
    }

    fn read_value(&self) -> Result<f64, SensorError> {
        match self.script {
            Script::Value(v) => Ok(v),
            Script::Fail(e) => Err(e),
            Script::Slow(v, delay) => {
                thread::sleep(delay);
                Ok(v)
            }
        }
    }
}

/// Event sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::SensorUnavailable { sensor, .. } => Some(sensor.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
