//! Application service: the hexagonal core.
//!
//! [`MonitorService`] owns the sensor registry and the processor.  It
//! exposes a transport-agnostic API; the gateway is just one caller.
//! Events flow out through an [`EventSink`] injected at call sites, which
//! keeps the service testable with a recording sink.
//!
//! ```text
//!  QueryRequest ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │      MonitorService       │
//!  SimulateInput ──▶│  Registry · Processor     │ ──▶ WaterDataReport
//!                   └──────────────────────────┘
//! ```

use std::time::Duration;

use log::info;
use serde::Serialize;

use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::processor::{WaterDataProcessor, WaterDataReport};
use crate::range::SafeRange;
use crate::registry::SensorRegistry;
use crate::sensors::SensorKind;

use super::commands::{QueryRequest, SimulateInput};
use super::events::AppEvent;
use super::ports::EventSink;

/// Upper bound for simulated read latency.
pub const MAX_SIM_LATENCY_MS: u64 = 10_000;

/// How a query reads its sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One after another on the calling thread, no timeout.
    Sequential,
    /// All at once, each bounded by the configured read timeout.
    Concurrent,
}

/// Static description of a registered sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorInfo {
    pub name: String,
    pub kind: SensorKind,
    pub unit: &'static str,
    pub safe_range: SafeRange,
}

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    registry: SensorRegistry,
    processor: WaterDataProcessor,
}

impl MonitorService {
    pub fn new(registry: SensorRegistry, processor: WaterDataProcessor) -> Self {
        Self {
            registry,
            processor,
        }
    }

    /// Validate `config` and build simulated probes for every sensor in it.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        config.validate()?;
        let registry = SensorRegistry::from_config(config)?;
        info!(
            "monitor ready: {} sensor(s), read timeout {} ms",
            registry.len(),
            config.read_timeout_ms
        );
        Ok(Self::new(registry, WaterDataProcessor::from_config(config)))
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Read, classify and report the requested sensors.
    ///
    /// Unknown sensor names fail the whole request; sensor faults do not.
    pub fn query(
        &self,
        request: &QueryRequest,
        mode: ReadMode,
        sink: &mut impl EventSink,
    ) -> Result<WaterDataReport> {
        let sensors = self.registry.select(&request.sensors)?;
        let report = match mode {
            ReadMode::Sequential => self.processor.process(&sensors),
            ReadMode::Concurrent => self.processor.process_concurrent(&sensors),
        };

        for r in report.unavailable() {
            sink.emit(&AppEvent::SensorUnavailable {
                sensor: r.sensor_name.clone(),
                reason: r.error.clone().unwrap_or_default(),
            });
        }
        sink.emit(&AppEvent::ReportProduced {
            sensors: report.readings.len(),
            overall: report.overall_status,
        });
        Ok(report)
    }

    pub fn sensors(&self) -> Vec<SensorInfo> {
        self.registry
            .snapshot()
            .iter()
            .map(|s| SensorInfo {
                name: s.name().to_owned(),
                kind: s.kind(),
                unit: s.unit(),
                safe_range: s.safe_range(),
            })
            .collect()
    }

    /// Drive the simulated channel behind `name`.
    pub fn simulate(
        &self,
        name: &str,
        input: &SimulateInput,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if input.millivolts.is_some_and(|mv| !mv.is_finite()) {
            return Err(Error::InvalidInput("millivolts must be finite"));
        }
        if input.latency_ms.is_some_and(|ms| ms > MAX_SIM_LATENCY_MS) {
            return Err(Error::InvalidInput("latencyMs must be at most 10000"));
        }
        let channel = self.registry.channel(name)?;
        if let Some(mv) = input.millivolts {
            channel.set_millivolts(mv);
        }
        if let Some(connected) = input.connected {
            channel.set_connected(connected);
        }
        if let Some(ms) = input.latency_ms {
            channel.set_latency(Duration::from_millis(ms));
        }
        sink.emit(&AppEvent::SimulationUpdated {
            sensor: name.to_owned(),
        });
        Ok(())
    }
}
