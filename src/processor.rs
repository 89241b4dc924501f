//! Water data processor: reads, classifies and reports a batch of sensors.
//!
//! ```text
//!   &[Arc<dyn Sensor>] ──▶ read ──▶ classify ──▶ describe ──▶ WaterDataReport
//! ```
//!
//! Per-sensor faults (failed reads, non-finite values, timeouts) are
//! isolated: the affected sensor is reported as [`Status::Unavailable`] and
//! the rest of the batch is processed normally.
//!
//! ## Read strategies
//!
//! - [`WaterDataProcessor::process`] reads sensors one after another on the
//!   calling thread. Suited to cheap in-memory or simulated probes.
//! - [`WaterDataProcessor::process_concurrent`] starts every read on its own
//!   worker thread and polls them all from a single future driven by a
//!   reactor timer.  A read still running at the deadline is reported as
//!   [`SensorError::Timeout`]; its worker is parked until it finishes, and
//!   the same sensor is not read again while it is still parked.
//!
//! A panic inside `read_value` is a defect in the sensor, not a fault of
//! the probe.  Neither strategy catches it.

use std::fmt;
use std::mem;
use std::panic;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;

use crate::classifier::classify;
use crate::config::SystemConfig;
use crate::error::SensorError;
use crate::sensors::{Sensor, SensorReading};
use crate::status::Status;

/// Per-sensor output unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReport {
    pub sensor_name: String,
    /// `None` when the sensor could not produce a usable value.
    pub value: Option<f64>,
    pub unit: &'static str,
    pub status: Status,
    pub label: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Fault description for `Unavailable` reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SensorReport {
    fn classified(reading: SensorReading, status: Status) -> Self {
        let d = status.descriptor();
        Self {
            sensor_name: reading.sensor_name,
            value: Some(reading.value),
            unit: reading.unit,
            status,
            label: d.label,
            color: d.color,
            timestamp: Some(reading.timestamp),
            error: None,
        }
    }

    fn unavailable(sensor: &dyn Sensor, reason: String) -> Self {
        let d = Status::Unavailable.descriptor();
        Self {
            sensor_name: sensor.name().to_owned(),
            value: None,
            unit: sensor.unit(),
            status: Status::Unavailable,
            label: d.label,
            color: d.color,
            timestamp: None,
            error: Some(reason),
        }
    }
}

/// Aggregated, ordered result of one processing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterDataReport {
    /// One entry per input sensor, in input order.
    pub readings: Vec<SensorReport>,
    /// Worst status across `readings`; `Normal` for an empty batch.
    pub overall_status: Status,
    pub generated_at: DateTime<Utc>,
}

impl WaterDataReport {
    fn from_readings(readings: Vec<SensorReport>) -> Self {
        let overall_status = Status::worst(readings.iter().map(|r| r.status));
        Self {
            readings,
            overall_status,
            generated_at: Utc::now(),
        }
    }

    /// Reports whose status is `Unavailable`.
    pub fn unavailable(&self) -> impl Iterator<Item = &SensorReport> {
        self.readings
            .iter()
            .filter(|r| r.status == Status::Unavailable)
    }
}

/// Orchestrates read → classify → describe over a batch of sensors.
///
/// Holds no sensors of its own; callers pass the batch into every call.
/// Clones share the list of stalled workers.
#[derive(Clone)]
pub struct WaterDataProcessor {
    read_timeout: Duration,
    poll_interval: Duration,
    stalled: Arc<Mutex<Vec<StalledRead>>>,
}

/// A worker abandoned at a deadline that has not finished yet.
struct StalledRead {
    sensor: Arc<dyn Sensor>,
    handle: JoinHandle<ReadOutcome>,
}

impl fmt::Debug for WaterDataProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaterDataProcessor")
            .field("read_timeout", &self.read_timeout)
            .field("poll_interval", &self.poll_interval)
            .field("stalled", &self.stalled_reads())
            .finish()
    }
}

impl Default for WaterDataProcessor {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl WaterDataProcessor {
    pub fn new(read_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            read_timeout,
            poll_interval,
            stalled: Arc::default(),
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(
            Duration::from_millis(config.read_timeout_ms),
            Duration::from_millis(config.poll_interval_ms),
        )
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Workers left running by earlier timeouts.
    pub fn stalled_reads(&self) -> usize {
        self.stalled().len()
    }

    /// Read and classify `sensors` sequentially on the calling thread.
    pub fn process(&self, sensors: &[Arc<dyn Sensor>]) -> WaterDataReport {
        let readings = sensors
            .iter()
            .map(|sensor| report_for(sensor.as_ref(), sensor.read()))
            .collect();
        let report = WaterDataReport::from_readings(readings);
        log_summary(&report);
        report
    }

    /// Read `sensors` in parallel, each bounded by the read timeout.
    ///
    /// Blocks the calling thread until every read has finished or timed out.
    /// A sensor whose previous worker is still stalled is reported as timed
    /// out straight away and gets no new worker.
    ///
    /// # Panics
    ///
    /// A panic inside a sensor's read is resumed on the calling thread.
    pub fn process_concurrent(&self, sensors: &[Arc<dyn Sensor>]) -> WaterDataReport {
        let pending: Vec<PendingRead> = {
            let mut stalled = self.stalled();
            reap(&mut stalled);
            sensors
                .iter()
                .map(|sensor| {
                    if stalled.iter().any(|w| Arc::ptr_eq(&w.sensor, sensor)) {
                        warn!("{}: previous read still in flight", sensor.name());
                        PendingRead::Done(Err(SensorError::Timeout))
                    } else {
                        spawn_read(Arc::clone(sensor))
                    }
                })
                .collect()
        };
        let outcomes = futures_lite::future::block_on(self.await_reads(pending));

        let readings = sensors
            .iter()
            .zip(outcomes)
            .map(|(sensor, outcome)| report_for(sensor.as_ref(), outcome))
            .collect();
        let report = WaterDataReport::from_readings(readings);
        log_summary(&report);
        report
    }

    /// Poll every pending read until all are done or the deadline passes.
    async fn await_reads(&self, mut pending: Vec<PendingRead>) -> Vec<ReadOutcome> {
        let deadline = Instant::now() + self.read_timeout;
        loop {
            let mut outstanding = 0usize;
            for slot in &mut pending {
                if !slot.is_running() {
                    continue;
                }
                if slot.is_finished() {
                    slot.finish();
                } else {
                    outstanding += 1;
                }
            }
            if outstanding == 0 {
                break;
            }
            if Instant::now() >= deadline {
                warn!("{outstanding} sensor read(s) exceeded {:?}", self.read_timeout);
                break;
            }
            async_io_mini::Timer::after(self.poll_interval).await;
        }

        // Anything still running is abandoned and parked until it finishes.
        let mut stalled = self.stalled();
        pending
            .into_iter()
            .map(|slot| match slot {
                PendingRead::Done(outcome) => outcome,
                PendingRead::Running(sensor, handle) => {
                    stalled.push(StalledRead { sensor, handle });
                    Err(SensorError::Timeout)
                }
            })
            .collect()
    }

    fn stalled(&self) -> MutexGuard<'_, Vec<StalledRead>> {
        self.stalled.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Join stalled workers that have since finished.
fn reap(stalled: &mut Vec<StalledRead>) {
    let mut i = 0;
    while i < stalled.len() {
        if !stalled[i].handle.is_finished() {
            i += 1;
            continue;
        }
        let done = stalled.swap_remove(i);
        if done.handle.join().is_err() {
            error!("{}: abandoned read panicked", done.sensor.name());
        }
    }
}

type ReadOutcome = Result<SensorReading, SensorError>;

enum PendingRead {
    Running(Arc<dyn Sensor>, JoinHandle<ReadOutcome>),
    Done(ReadOutcome),
}

impl PendingRead {
    fn is_running(&self) -> bool {
        matches!(self, Self::Running(..))
    }

    fn is_finished(&self) -> bool {
        matches!(self, Self::Running(_, handle) if handle.is_finished())
    }

    /// Join a finished worker and store its outcome.
    fn finish(&mut self) {
        if let Self::Running(_, handle) = mem::replace(self, Self::Done(Err(SensorError::Timeout))) {
            match handle.join() {
                Ok(outcome) => *self = Self::Done(outcome),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
    }
}

fn spawn_read(sensor: Arc<dyn Sensor>) -> PendingRead {
    let worker = Arc::clone(&sensor);
    let spawned = thread::Builder::new()
        .name(format!("read-{}", sensor.name()))
        .spawn(move || worker.read());
    match spawned {
        Ok(handle) => PendingRead::Running(sensor, handle),
        Err(e) => {
            warn!("failed to spawn read worker: {e}");
            PendingRead::Done(Err(SensorError::WorkerFailed))
        }
    }
}

/// Turn one read outcome into a report, isolating any fault.
fn report_for(sensor: &dyn Sensor, outcome: ReadOutcome) -> SensorReport {
    match outcome {
        Ok(reading) => match classify(reading.value, &sensor.safe_range()) {
            Ok(status) => SensorReport::classified(reading, status),
            Err(e) => {
                warn!("{}: {e}", sensor.name());
                SensorReport::unavailable(sensor, e.to_string())
            }
        },
        Err(e) => {
            warn!("{}: {e}", sensor.name());
            SensorReport::unavailable(sensor, e.to_string())
        }
    }
}

fn log_summary(report: &WaterDataReport) {
    info!(
        "processed {} sensor(s), overall={} ({} unavailable)",
        report.readings.len(),
        report.overall_status,
        report.unavailable().count()
    );
}
