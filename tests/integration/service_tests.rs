//! MonitorService end to end over the default simulated probe set.

use simoka::Status;
use simoka::app::commands::{QueryRequest, SimulateInput};
use simoka::app::events::AppEvent;
use simoka::app::service::{MAX_SIM_LATENCY_MS, MonitorService, ReadMode};
use simoka::config::SystemConfig;
use simoka::error::Error;
use simoka::sensors::ph::PhSensor;

use crate::mock_sensors::{RecordingSink, Script, ScriptedSensor};

fn make_service() -> (MonitorService, RecordingSink) {
    let service = MonitorService::from_config(&SystemConfig::default()).unwrap();
    (service, RecordingSink::new())
}

fn request(names: &[&str]) -> QueryRequest {
    QueryRequest {
        sensors: names.iter().map(|s| (*s).to_owned()).collect(),
    }
}

#[test]
fn default_probes_are_all_normal() {
    let (service, mut sink) = make_service();
    let report = service
        .query(&QueryRequest::default(), ReadMode::Sequential, &mut sink)
        .unwrap();
    assert_eq!(report.readings.len(), 4);
    assert_eq!(report.overall_status, Status::Normal);
    let ph = &report.readings[0];
    assert_eq!(ph.sensor_name, "ph");
    assert!((ph.value.unwrap() - 7.2).abs() < 1e-9);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::ReportProduced {
            sensors: 4,
            overall: Status::Normal
        })
    );
}

#[test]
fn selection_limits_and_orders_readings() {
    let (service, mut sink) = make_service();
    let report = service
        .query(&request(&["temperature", "ph"]), ReadMode::Concurrent, &mut sink)
        .unwrap();
    let names: Vec<_> = report.readings.iter().map(|r| r.sensor_name.as_str()).collect();
    assert_eq!(names, ["temperature", "ph"]);
    assert_eq!(report.readings[0].unit, "\u{00b0}C");
}

#[test]
fn unknown_sensor_escalates() {
    let (service, mut sink) = make_service();
    let err = service
        .query(&request(&["ph", "chlorine"]), ReadMode::Sequential, &mut sink)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownSensor(n) if n == "chlorine"));
    assert!(sink.events.is_empty());
}

#[test]
fn simulated_drift_changes_status() {
    let (service, mut sink) = make_service();
    service
        .simulate(
            "ph",
            &SimulateInput {
                millivolts: Some(PhSensor::millivolts_for(8.8)),
                ..SimulateInput::default()
            },
            &mut sink,
        )
        .unwrap();
    let report = service
        .query(&request(&["ph"]), ReadMode::Sequential, &mut sink)
        .unwrap();
    assert_eq!(report.overall_status, Status::Warning);
    assert_eq!(report.readings[0].color, "orange");
}

#[test]
fn unplugged_probe_is_reported_and_emitted() {
    let (service, mut sink) = make_service();
    service
        .simulate(
            "turbidity",
            &SimulateInput {
                connected: Some(false),
                ..SimulateInput::default()
            },
            &mut sink,
        )
        .unwrap();
    let report = service
        .query(&QueryRequest::default(), ReadMode::Concurrent, &mut sink)
        .unwrap();
    assert_eq!(report.readings[1].status, Status::Unavailable);
    assert_eq!(report.overall_status, Status::Unavailable);
    assert_eq!(sink.unavailable(), ["turbidity"]);
}

#[test]
fn simulate_rejects_bad_input() {
    let (service, mut sink) = make_service();
    let nan = SimulateInput {
        millivolts: Some(f64::NAN),
        ..SimulateInput::default()
    };
    assert!(matches!(
        service.simulate("ph", &nan, &mut sink),
        Err(Error::InvalidInput(_))
    ));
    let sluggish = SimulateInput {
        latency_ms: Some(MAX_SIM_LATENCY_MS + 1),
        ..SimulateInput::default()
    };
    assert!(matches!(
        service.simulate("ph", &sluggish, &mut sink),
        Err(Error::InvalidInput(_))
    ));
    assert!(sink.events.is_empty());
    assert!(matches!(
        service.simulate("salinity", &SimulateInput::default(), &mut sink),
        Err(Error::UnknownSensor(_))
    ));
}

#[test]
fn non_simulated_sensor_cannot_be_driven() {
    let (service, mut sink) = make_service();
    service
        .registry()
        .register(ScriptedSensor::arc("external", Script::Value(7.0)))
        .unwrap();
    assert!(matches!(
        service.simulate("external", &SimulateInput::default(), &mut sink),
        Err(Error::NotSimulated(_))
    ));
    assert_eq!(service.sensors().len(), 5);
}

#[test]
fn sensor_listing_carries_ranges() {
    let (service, _) = make_service();
    let info = service.sensors();
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json[0]["name"], "ph");
    assert_eq!(json[0]["kind"], "ph");
    assert_eq!(json[0]["safeRange"]["min"], 6.5);
    assert_eq!(json[3]["unit"], "mg/L");
}
