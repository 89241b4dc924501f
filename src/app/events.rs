//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them.

use crate::status::Status;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A report was assembled for a batch of sensors.
    ReportProduced { sensors: usize, overall: Status },

    /// One sensor in a batch produced no usable value.
    SensorUnavailable { sensor: String, reason: String },

    /// A simulated channel was driven to new inputs.
    SimulationUpdated { sensor: String },
}
