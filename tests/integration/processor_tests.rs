//! Processor behaviour over mixed batches: ordering, fault isolation and
//! worst-case aggregation, for both read strategies.

use std::time::{Duration, Instant};

use simoka::error::SensorError;
use simoka::{Status, WaterDataProcessor};

use crate::mock_sensors::{Script, ScriptedSensor};

fn processor() -> WaterDataProcessor {
    WaterDataProcessor::new(Duration::from_millis(150), Duration::from_millis(1))
}

fn statuses(report: &simoka::WaterDataReport) -> Vec<Status> {
    report.readings.iter().map(|r| r.status).collect()
}

#[test]
fn empty_batch_reports_normal_for_both_strategies() {
    let p = processor();
    for report in [p.process(&[]), p.process_concurrent(&[])] {
        assert!(report.readings.is_empty());
        assert_eq!(report.overall_status, Status::Normal);
    }
}

#[test]
fn overall_is_worst_individual_status() {
    let sensors = [
        ScriptedSensor::arc("a", Script::Value(7.0)),
        ScriptedSensor::arc("b", Script::Value(8.8)),
        ScriptedSensor::arc("c", Script::Value(7.5)),
    ];
    let report = processor().process(&sensors);
    assert_eq!(statuses(&report), [Status::Normal, Status::Warning, Status::Normal]);
    assert_eq!(report.overall_status, Status::Warning);
}

#[test]
fn unavailable_outranks_danger() {
    let sensors = [
        ScriptedSensor::arc("a", Script::Value(1.0)),
        ScriptedSensor::arc("b", Script::Fail(SensorError::Disconnected)),
    ];
    let report = processor().process(&sensors);
    assert_eq!(statuses(&report), [Status::Danger, Status::Unavailable]);
    assert_eq!(report.overall_status, Status::Unavailable);
}

#[test]
fn failed_read_does_not_hide_other_sensors() {
    let sensors = [
        ScriptedSensor::arc("first", Script::Fail(SensorError::Disconnected)),
        ScriptedSensor::arc("second", Script::Value(7.0)),
        ScriptedSensor::arc("third", Script::Fail(SensorError::SignalOutOfRange(9999.0))),
        ScriptedSensor::arc("fourth", Script::Value(6.2)),
    ];
    for report in [processor().process(&sensors), processor().process_concurrent(&sensors)] {
        let names: Vec<_> = report.readings.iter().map(|r| r.sensor_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third", "fourth"]);
        assert_eq!(
            statuses(&report),
            [Status::Unavailable, Status::Normal, Status::Unavailable, Status::Warning]
        );
        let failed = &report.readings[0];
        assert_eq!(failed.value, None);
        assert_eq!((failed.label, failed.color), ("Unavailable", "gray"));
    }
}

#[test]
fn nan_reading_is_unavailable_not_danger() {
    let sensors = [
        ScriptedSensor::arc("nan", Script::Value(f64::NAN)),
        ScriptedSensor::arc("inf", Script::Value(f64::INFINITY)),
        ScriptedSensor::arc("ok", Script::Value(7.0)),
    ];
    let report = processor().process(&sensors);
    assert_eq!(
        statuses(&report),
        [Status::Unavailable, Status::Unavailable, Status::Normal]
    );
    assert!(report.readings[0]
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("invalid reading")));
}

#[test]
fn concurrent_reads_overlap() {
    let delay = Duration::from_millis(60);
    let sensors: Vec<_> = (0..4)
        .map(|i| ScriptedSensor::arc(&format!("s{i}"), Script::Slow(7.0, delay)))
        .collect();
    let p = WaterDataProcessor::new(Duration::from_millis(1000), Duration::from_millis(1));

    let started = Instant::now();
    let report = p.process_concurrent(&sensors);
    let elapsed = started.elapsed();

    assert_eq!(report.overall_status, Status::Normal);
    // Sequential would take at least 4 x 60 ms.
    assert!(elapsed < delay * 4, "reads did not overlap: {elapsed:?}");
}

#[test]
fn slow_sensor_times_out_without_blocking_others() {
    let sensors = [
        ScriptedSensor::arc("fast", Script::Value(7.0)),
        ScriptedSensor::arc("stuck", Script::Slow(7.0, Duration::from_secs(2))),
        ScriptedSensor::arc("danger", Script::Value(12.0)),
    ];
    let started = Instant::now();
    let report = processor().process_concurrent(&sensors);
    assert!(started.elapsed() < Duration::from_secs(1));

    assert_eq!(
        statuses(&report),
        [Status::Normal, Status::Unavailable, Status::Danger]
    );
    assert_eq!(report.readings[1].error.as_deref(), Some("read timed out"));
    assert_eq!(report.overall_status, Status::Unavailable);
}
