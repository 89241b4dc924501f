//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against scripted sensors.  All tests run on the host with simulated
//! probes only.

mod mock_sensors;
mod processor_tests;
mod service_tests;
