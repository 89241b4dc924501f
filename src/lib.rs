//! SIMOKA water-quality monitor library.
//!
//! Classifies sensor readings into Normal / Warning / Danger against
//! per-sensor safe ranges and assembles ordered reports.  The HTTP gateway
//! in [`adapters`] is compiled only with the `gateway` feature; everything
//! else is transport-agnostic and usable on its own.

#![deny(unused_must_use)]

// Links the host time driver that backs the read poll timer.
use embassy_time as _;

pub mod adapters;
pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod processor;
pub mod range;
pub mod registry;
pub mod sensors;
pub mod status;

pub use classifier::classify;
pub use error::{Error, Result};
pub use processor::{SensorReport, WaterDataProcessor, WaterDataReport};
pub use range::SafeRange;
pub use sensors::{Sensor, SensorReading};
pub use status::{Status, StatusDescriptor};
