//! Safe-range model.
//!
//! A [`SafeRange`] is the inclusive interval `[min, max]` of acceptable
//! values plus a warning margin on each side.  The margin must stay below
//! half the span so the Warning bands of the two sides never meet.

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Inclusive acceptable interval with a symmetric warning margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSafeRange", rename_all = "camelCase")]
pub struct SafeRange {
    min: f64,
    max: f64,
    warning_margin: f64,
}

/// Unvalidated wire form; every deserialized range passes through [`SafeRange::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSafeRange {
    min: f64,
    max: f64,
    #[serde(default)]
    warning_margin: f64,
}

impl TryFrom<RawSafeRange> for SafeRange {
    type Error = RangeError;

    fn try_from(raw: RawSafeRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max, raw.warning_margin)
    }
}

impl SafeRange {
    /// Build a validated range.
    pub fn new(min: f64, max: f64, warning_margin: f64) -> Result<Self, RangeError> {
        if !(min.is_finite() && max.is_finite() && warning_margin.is_finite()) {
            return Err(RangeError::NonFinite);
        }
        if min >= max {
            return Err(RangeError::Inverted { min, max });
        }
        let limit = (max - min) / 2.0;
        if warning_margin < 0.0 || warning_margin >= limit {
            return Err(RangeError::MarginOutOfBounds {
                margin: warning_margin,
                limit,
            });
        }
        Ok(Self {
            min,
            max,
            warning_margin,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn warning_margin(&self) -> f64 {
        self.warning_margin
    }

    /// True when `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// True when `value` lies inside `[min - margin, max + margin]`.
    pub fn contains_with_margin(&self, value: f64) -> bool {
        (self.min - self.warning_margin..=self.max + self.warning_margin).contains(&value)
    }
}
