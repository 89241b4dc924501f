//! Simulated analog input channel.
//!
//! Every probe in the monitor samples a voltage through an
//! [`AnalogChannel`].  The channel is a cheap, cloneable handle over shared
//! atomics: the sensor holds one clone and reads from it, while the gateway
//! (or a test) holds another and injects millivolts, unplugs the probe, or
//! adds read latency to mimic slow hardware.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crate::error::SensorError;

#[derive(Debug)]
struct ChannelState {
    /// `f64` millivolts stored as raw bits.
    millivolts: AtomicU64,
    connected: AtomicBool,
    latency_ms: AtomicU64,
}

/// Shared handle to one analog input.
#[derive(Debug, Clone)]
pub struct AnalogChannel {
    state: Arc<ChannelState>,
}

impl AnalogChannel {
    /// A connected channel currently sampling `millivolts`.
    pub fn new(millivolts: f64) -> Self {
        Self {
            state: Arc::new(ChannelState {
                millivolts: AtomicU64::new(millivolts.to_bits()),
                connected: AtomicBool::new(true),
                latency_ms: AtomicU64::new(0),
            }),
        }
    }

    pub fn set_millivolts(&self, millivolts: f64) {
        self.state
            .millivolts
            .store(millivolts.to_bits(), Ordering::Relaxed);
    }

    pub fn millivolts(&self) -> f64 {
        f64::from_bits(self.state.millivolts.load(Ordering::Relaxed))
    }

    /// Plug (`true`) or unplug (`false`) the probe.
    pub fn set_connected(&self, connected: bool) {
        self.state.connected.store(connected, Ordering::Relaxed);
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::Relaxed)
    }

    /// Extra blocking delay applied to every sample.
    pub fn set_latency(&self, latency: Duration) {
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.state.latency_ms.store(ms, Ordering::Relaxed);
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.state.latency_ms.load(Ordering::Relaxed))
    }

    /// Take one sample.  Blocks for the configured latency first.
    pub fn sample(&self) -> Result<f64, SensorError> {
        let latency = self.latency();
        if !latency.is_zero() {
            thread::sleep(latency);
        }
        if !self.is_connected() {
            return Err(SensorError::Disconnected);
        }
        Ok(self.millivolts())
    }
}

/// Reject a sample that falls outside a converter's plausible window.
pub(crate) fn check_window(millivolts: f64, min_mv: f64, max_mv: f64) -> Result<f64, SensorError> {
    if millivolts.is_finite() && (min_mv..=max_mv).contains(&millivolts) {
        Ok(millivolts)
    } else {
        Err(SensorError::SignalOutOfRange(millivolts))
    }
}
