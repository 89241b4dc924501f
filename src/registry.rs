//! Process-wide sensor registry.
//!
//! Registration and removal take the write lock; queries take the read
//! lock just long enough to clone out an immutable `Vec<Arc<dyn Sensor>>`.
//! A `process()` call therefore always works on a consistent snapshot,
//! even if the set changes while it runs.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;

use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::sensors::{self, AnalogChannel, Sensor};

struct Entry {
    sensor: Arc<dyn Sensor>,
    /// Present for probes backed by a simulated analog channel.
    channel: Option<AnalogChannel>,
}

/// Ordered, name-unique set of sensors.
#[derive(Default)]
pub struct SensorRegistry {
    entries: RwLock<Vec<Entry>>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build simulated probes for every configured sensor.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        let registry = Self::new();
        for sc in &config.sensors {
            let channel = AnalogChannel::new(sc.millivolts);
            let sensor = sensors::build(sc.kind, sc.name.clone(), sc.safe_range, channel.clone());
            registry.register_simulated(sensor, channel)?;
        }
        Ok(registry)
    }

    pub fn register(&self, sensor: Arc<dyn Sensor>) -> Result<()> {
        self.insert(Entry {
            sensor,
            channel: None,
        })
    }

    /// Register a sensor together with the channel that drives it.
    pub fn register_simulated(&self, sensor: Arc<dyn Sensor>, channel: AnalogChannel) -> Result<()> {
        self.insert(Entry {
            sensor,
            channel: Some(channel),
        })
    }

    fn insert(&self, entry: Entry) -> Result<()> {
        let mut entries = self.write();
        let name = entry.sensor.name();
        if entries.iter().any(|e| e.sensor.name() == name) {
            return Err(Error::DuplicateSensor(name.to_owned()));
        }
        info!("registered sensor '{}' ({})", name, entry.sensor.unit());
        entries.push(entry);
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Result<Arc<dyn Sensor>> {
        let mut entries = self.write();
        let idx = entries
            .iter()
            .position(|e| e.sensor.name() == name)
            .ok_or_else(|| Error::UnknownSensor(name.to_owned()))?;
        info!("removed sensor '{name}'");
        Ok(entries.remove(idx).sensor)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.read()
            .iter()
            .map(|e| e.sensor.name().to_owned())
            .collect()
    }

    /// Every registered sensor, in registration order.
    pub fn snapshot(&self) -> Vec<Arc<dyn Sensor>> {
        self.read().iter().map(|e| Arc::clone(&e.sensor)).collect()
    }

    /// Sensors named in `names`, in request order.  An empty list selects
    /// every registered sensor.  Any unknown name fails the whole selection.
    pub fn select(&self, names: &[String]) -> Result<Vec<Arc<dyn Sensor>>> {
        if names.is_empty() {
            return Ok(self.snapshot());
        }
        let entries = self.read();
        names
            .iter()
            .map(|name| {
                entries
                    .iter()
                    .find(|e| e.sensor.name() == name)
                    .map(|e| Arc::clone(&e.sensor))
                    .ok_or_else(|| Error::UnknownSensor(name.clone()))
            })
            .collect()
    }

    /// Simulation handle for `name`.
    pub fn channel(&self, name: &str) -> Result<AnalogChannel> {
        let entries = self.read();
        let entry = entries
            .iter()
            .find(|e| e.sensor.name() == name)
            .ok_or_else(|| Error::UnknownSensor(name.to_owned()))?;
        entry
            .channel
            .clone()
            .ok_or_else(|| Error::NotSimulated(name.to_owned()))
    }

    // A panic while holding the lock cannot leave the Vec half-updated,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
