//! Inbound requests to the application service.
//!
//! These are the payloads the gateway decodes and hands to
//! [`MonitorService`](super::service::MonitorService).

use serde::Deserialize;

/// Which sensors to read.  An empty list means every registered sensor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub sensors: Vec<String>,
}

impl QueryRequest {
    /// Parse a comma-separated list (`"ph, turbidity"`), skipping blanks.
    pub fn from_csv(csv: &str) -> Self {
        Self {
            sensors: csv
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// New inputs for a simulated analog channel.  Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulateInput {
    pub millivolts: Option<f64>,
    pub connected: Option<bool>,
    pub latency_ms: Option<u64>,
}
