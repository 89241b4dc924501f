//! Application core: sensor orchestration with no transport concerns.
//!
//! This module wires the registry and the processor into a single
//! service.  All interaction with loggers and storage happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
