//! Status classifier.
//!
//! Maps a reading and its [`SafeRange`] onto a [`Status`]:
//!
//! ```text
//!   Danger │ Warning │       Normal        │ Warning │ Danger
//! ─────────┼─────────┼─────────────────────┼─────────┼─────────
//!     min - margin   min                  max    max + margin
//! ```
//!
//! Bounds are inclusive on the permissive side: `min` and `max` are Normal,
//! `min - margin` and `max + margin` are Warning.

use crate::error::ClassifyError;
use crate::range::SafeRange;
use crate::status::Status;

/// Classify `value` against `range`.
///
/// Non-finite input is rejected instead of being folded into a band, so a
/// faulty probe never reads as Normal or Danger.
pub fn classify(value: f64, range: &SafeRange) -> Result<Status, ClassifyError> {
    if !value.is_finite() {
        return Err(ClassifyError::InvalidReading(value));
    }
    let status = if range.contains(value) {
        Status::Normal
    } else if range.contains_with_margin(value) {
        Status::Warning
    } else {
        Status::Danger
    };
    Ok(status)
}
