//! Fuzz target: `SystemConfig` deserialization
//!
//! Feeds arbitrary bytes to the JSON config parser.  It must never panic,
//! and every safe range that survives parsing must satisfy the range
//! invariants even when `validate()` later rejects the document.
//!
//! cargo fuzz run fuzz_config_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use simoka::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<SystemConfig>(data) else {
        return;
    };
    for sensor in &config.sensors {
        let r = sensor.safe_range;
        assert!(r.min() < r.max());
        assert!(r.warning_margin() >= 0.0);
        assert!(r.warning_margin() < (r.max() - r.min()) / 2.0);
    }
    let _ = config.validate();
});
