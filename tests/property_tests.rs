//! Property tests for the classifier bands and report aggregation.

use std::sync::Arc;

use proptest::prelude::*;
use simoka::error::{ClassifyError, SensorError};
use simoka::sensors::{Sensor, SensorKind};
use simoka::{SafeRange, Status, WaterDataProcessor, classify};

/// Arbitrary valid range: finite bounds, margin strictly below half the span.
fn arb_range() -> impl Strategy<Value = SafeRange> {
    (-1000.0f64..1000.0, 0.01f64..500.0, 0.0f64..0.999).prop_map(|(min, span, frac)| {
        let margin = frac * span / 2.0;
        SafeRange::new(min, min + span, margin).unwrap()
    })
}

proptest! {
    #[test]
    fn inside_range_is_normal(range in arb_range(), t in 0.0f64..=1.0) {
        let v = range.min() + t * (range.max() - range.min());
        let v = v.clamp(range.min(), range.max());
        prop_assert_eq!(classify(v, &range), Ok(Status::Normal));
    }

    #[test]
    fn bounds_are_normal(range in arb_range()) {
        prop_assert_eq!(classify(range.min(), &range), Ok(Status::Normal));
        prop_assert_eq!(classify(range.max(), &range), Ok(Status::Normal));
    }

    #[test]
    fn margin_bands_are_warning(range in arb_range(), t in 0.01f64..=1.0, upper in any::<bool>()) {
        prop_assume!(range.warning_margin() > 0.0);
        let offset = t * range.warning_margin();
        let v = if upper { range.max() + offset } else { range.min() - offset };
        // Rounding can land exactly on a bound; that case belongs to Normal.
        prop_assume!(!range.contains(v) && range.contains_with_margin(v));
        prop_assert_eq!(classify(v, &range), Ok(Status::Warning));
    }

    #[test]
    fn beyond_margin_is_danger(range in arb_range(), extra in 0.001f64..1e6, upper in any::<bool>()) {
        let v = if upper {
            range.max() + range.warning_margin() + extra
        } else {
            range.min() - range.warning_margin() - extra
        };
        prop_assert_eq!(classify(v, &range), Ok(Status::Danger));
    }

    #[test]
    fn non_finite_is_always_rejected(range in arb_range()) {
        prop_assert!(matches!(classify(f64::NAN, &range), Err(ClassifyError::InvalidReading(_))));
        prop_assert!(classify(f64::INFINITY, &range).is_err());
        prop_assert!(classify(f64::NEG_INFINITY, &range).is_err());
    }

    #[test]
    fn invalid_ranges_never_construct(min in -100.0f64..100.0, span in -10.0f64..10.0, margin in -5.0f64..20.0) {
        let max = min + span;
        let ok = SafeRange::new(min, max, margin).is_ok();
        let valid = min < max && margin >= 0.0 && margin < (max - min) / 2.0;
        prop_assert_eq!(ok, valid);
    }
}

// ── Aggregation ──────────────────────────────────────────────

struct Fixed {
    name: String,
    outcome: Result<f64, SensorError>,
}

impl Sensor for Fixed {
    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> SensorKind {
        SensorKind::Ph
    }
    fn unit(&self) -> &'static str {
        "pH"
    }
    fn safe_range(&self) -> SafeRange {
        SafeRange::new(6.5, 8.5, 0.5).unwrap()
    }
    fn read_value(&self) -> Result<f64, SensorError> {
        self.outcome
    }
}

fn arb_outcome() -> impl Strategy<Value = Result<f64, SensorError>> {
    prop_oneof![
        (0.0f64..14.0).prop_map(Ok::<f64, SensorError>),
        Just(Err(SensorError::Disconnected)),
    ]
}

proptest! {
    #[test]
    fn overall_is_max_and_order_is_kept(outcomes in proptest::collection::vec(arb_outcome(), 0..12)) {
        let sensors: Vec<Arc<dyn Sensor>> = outcomes
            .iter()
            .enumerate()
            .map(|(i, o)| Arc::new(Fixed { name: format!("s{i}"), outcome: *o }) as Arc<dyn Sensor>)
            .collect();
        let report = WaterDataProcessor::default().process(&sensors);

        prop_assert_eq!(report.readings.len(), sensors.len());
        for (i, r) in report.readings.iter().enumerate() {
            prop_assert_eq!(&r.sensor_name, &format!("s{i}"));
            prop_assert_eq!((r.label, r.color), (r.status.label(), r.status.color()));
        }
        let max = report.readings.iter().map(|r| r.status).max().unwrap_or(Status::Normal);
        prop_assert_eq!(report.overall_status, max);
    }
}
