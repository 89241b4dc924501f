//! Fuzz target: `SafeRange::new` + `classify`
//!
//! Builds a range from three arbitrary f64s and classifies a fourth.
//! Construction must reject every invalid range, and classification of an
//! accepted range must agree with the band membership helpers and never
//! hand back a status for a non-finite value.
//!
//! cargo fuzz run fuzz_classify

#![no_main]

use libfuzzer_sys::fuzz_target;
use simoka::{SafeRange, Status, classify};

fn f64_at(data: &[u8], i: usize) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[i * 8..i * 8 + 8]);
    f64::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (min, max, margin, value) = (f64_at(data, 0), f64_at(data, 1), f64_at(data, 2), f64_at(data, 3));

    let Ok(range) = SafeRange::new(min, max, margin) else {
        return;
    };
    assert!(range.min() < range.max());
    assert!(range.warning_margin() >= 0.0);

    match classify(value, &range) {
        Ok(status) => {
            assert!(value.is_finite(), "non-finite value classified as {status}");
            let expected = if range.contains(value) {
                Status::Normal
            } else if range.contains_with_margin(value) {
                Status::Warning
            } else {
                Status::Danger
            };
            assert_eq!(status, expected);
        }
        Err(_) => assert!(!value.is_finite()),
    }
});
