//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  The gateway binary routes these to the console.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as a single line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ReportProduced { sensors, overall } => {
                info!("REPORT | sensors={} | overall={}", sensors, overall);
            }
            AppEvent::SensorUnavailable { sensor, reason } => {
                warn!("SENSOR | {} unavailable: {}", sensor, reason);
            }
            AppEvent::SimulationUpdated { sensor } => {
                info!("SIM | {} inputs updated", sensor);
            }
        }
    }
}
