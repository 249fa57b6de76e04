//! Integration tests for the Monitor → ReportEvents → EventSink pipeline.
//!
//! Drives a full alert episode through a monitor and checks which events
//! reach the sink, on which stream, and with which delivery flag.

use std::sync::Arc;

use alertwatch::app::report_events::{FIELD_ALERT_LEVEL, FIELD_ALERT_SEQUENCE, ReportEvents};
use alertwatch::config::ReportConfig;
use alertwatch::env::EnvironmentUpdate;
use alertwatch::measurement::Measurement;
use alertwatch::monitor::{AlertThresholds, Monitor, Range, SensorMonitor};

use crate::mock_sink::{RecordingSink, vars};

fn greenhouse() -> (Monitor, Arc<Measurement>) {
    let temp = Arc::new(Measurement::new("temp", Some("C")));
    let mut monitor = Monitor::new();
    monitor
        .add_monitor(SensorMonitor::with_thresholds(
            Arc::clone(&temp),
            AlertThresholds::new(Range::between(10.0, 30.0), Range::between(0.0, 40.0)),
        ))
        .unwrap();
    monitor
        .add_sensor(Arc::new(Measurement::with_value("humidity", Some("%"), 55.0)))
        .unwrap();
    (monitor, temp)
}

/// Read `value`, evaluate and publish.  The sink only holds this step's events.
fn step(
    monitor: &mut Monitor,
    temp: &Measurement,
    events: &mut ReportEvents,
    sink: &mut RecordingSink,
    value: f64,
) -> bool {
    sink.clear();
    temp.set_value(value);
    monitor.check_readings();
    events.send_report(monitor, sink)
}

// ── Publication policy across an episode ─────────────────────

#[test]
fn episode_publishes_edges_immediately_and_ongoing_batched() {
    let (mut monitor, temp) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig::default());
    let mut sink = RecordingSink::new();

    // quiet
    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 25.0));
    assert_eq!(sink.events.len(), 1);
    let data = sink.last_on("data.qo").unwrap();
    assert!(!data.immediate);
    assert!(!data.body.contains(FIELD_ALERT_SEQUENCE));
    assert!(!data.body.contains(FIELD_ALERT_LEVEL));
    assert_eq!(data.body.get_number("temp"), Some(25.0));
    assert_eq!(data.body.get_number("humidity"), Some(55.0));

    // first breach
    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 35.0));
    assert_eq!(sink.events.len(), 2);
    let data = sink.last_on("data.qo").unwrap();
    assert!(data.immediate);
    assert_eq!(data.body.get_str(FIELD_ALERT_SEQUENCE), Some("first"));
    assert_eq!(data.body.get_str(FIELD_ALERT_LEVEL), Some("warning"));
    let alert = sink.last_on("alert.qo").unwrap();
    assert!(alert.immediate);
    assert_eq!(alert.body.get_object("temp").unwrap().get_str("status"), Some("high"));

    // ongoing, escalating to critical
    for v in [36.0, 45.0] {
        assert!(step(&mut monitor, &temp, &mut events, &mut sink, v));
        assert_eq!(sink.events.len(), 2);
        assert!(sink.events.iter().all(|e| !e.immediate));
        let alert = sink.last_on("alert.qo").unwrap();
        assert_eq!(alert.body.get_str(FIELD_ALERT_SEQUENCE), Some("ongoing"));
    }
    assert_eq!(
        sink.last_on("alert.qo").unwrap().body.get_str(FIELD_ALERT_LEVEL),
        Some("critical")
    );

    // cleared: both events immediate, no level
    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 20.0));
    assert_eq!(sink.events.len(), 2);
    assert!(sink.events.iter().all(|e| e.immediate));
    let alert = sink.last_on("alert.qo").unwrap();
    assert_eq!(alert.body.get_str(FIELD_ALERT_SEQUENCE), Some("cleared"));
    assert!(!alert.body.contains(FIELD_ALERT_LEVEL));

    // back to quiet
    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 20.0));
    assert_eq!(sink.events.len(), 1);
    assert!(sink.on("alert.qo").is_empty());
}

#[test]
fn always_sync_expedites_monitor_events_only() {
    let (mut monitor, temp) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig {
        always_sync: true,
        ..ReportConfig::default()
    });
    let mut sink = RecordingSink::new();

    step(&mut monitor, &temp, &mut events, &mut sink, 25.0);
    assert!(sink.last_on("data.qo").unwrap().immediate);

    step(&mut monitor, &temp, &mut events, &mut sink, 35.0);
    step(&mut monitor, &temp, &mut events, &mut sink, 36.0);
    assert!(sink.last_on("data.qo").unwrap().immediate);
    assert!(!sink.last_on("alert.qo").unwrap().immediate);
}

// ── Failure handling ──────────────────────────────────────────

#[test]
fn registration_is_retried_until_accepted_and_never_blocks_data() {
    let (mut monitor, temp) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig::default());
    let mut sink = RecordingSink {
        fail_registrations: 2,
        ..RecordingSink::default()
    };

    assert!(!events.begin(&monitor, &mut sink));
    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 25.0));
    assert!(!events.is_registered());
    assert_eq!(sink.events.len(), 1, "data goes out without a schema");

    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 25.0));
    assert!(events.is_registered());
    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 25.0));
    assert_eq!(sink.registration_attempts, 3);
    assert_eq!(sink.schemas.len(), 1);
}

#[test]
fn failed_alert_publish_fails_report_but_monitor_event_still_sent() {
    let (mut monitor, temp) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig::default());
    let mut sink = RecordingSink::failing("alert.qo");

    assert!(step(&mut monitor, &temp, &mut events, &mut sink, 25.0));
    assert!(!step(&mut monitor, &temp, &mut events, &mut sink, 35.0));
    assert_eq!(sink.on("data.qo").len(), 1);
    assert_eq!(sink.on("alert.qo").len(), 1);
}

#[test]
fn failed_monitor_publish_still_attempts_alert() {
    let (mut monitor, temp) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig::default());
    let mut sink = RecordingSink::failing("data.qo");

    assert!(!step(&mut monitor, &temp, &mut events, &mut sink, 35.0));
    assert_eq!(sink.on("alert.qo").len(), 1);
}

// ── Notify stream ─────────────────────────────────────────────

#[test]
fn notify_is_a_no_op_without_changes_or_errors() {
    let (mut monitor, _) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig::default());
    let mut sink = RecordingSink::new();

    let mut update = EnvironmentUpdate::new(vars(&[("unrelated", "1")]));
    monitor.apply_config_update(&mut update, false);
    // temp's bounds were configured in code and are now absent
    assert!(update.has_changes());
    assert!(events.notify_update(&update, &mut sink));

    let mut update = EnvironmentUpdate::new(vars(&[("unrelated", "1")]));
    monitor.apply_config_update(&mut update, false);
    sink.clear();
    assert!(events.notify_update(&update, &mut sink));
    assert!(sink.events.is_empty());
}

#[test]
fn notify_reports_changes_and_errors_batched() {
    let (mut monitor, _) = greenhouse();
    let mut events = ReportEvents::new(ReportConfig::default());
    let mut sink = RecordingSink::new();

    let mut update = EnvironmentUpdate::new(vars(&[
        ("temp_normal_low", "10"),
        ("temp_normal_high", "28"),
        ("temp_warning_low", "0"),
        ("temp_warning_high", "hot"),
        ("humidity_normal_high", "80"),
    ]));
    monitor.apply_config_update(&mut update, false);
    assert!(events.notify_update(&update, &mut sink));

    let notify = sink.last_on("notify.qo").unwrap();
    assert!(!notify.immediate);
    let updates = notify.body.get_object("updates").unwrap();
    let keys: Vec<_> = updates.keys().collect();
    assert_eq!(keys, ["temp_normal_high", "humidity_normal_high"]);
    let t = updates.get_object("temp_normal_high").unwrap();
    assert_eq!(t.get_number("old_value"), Some(30.0));
    assert_eq!(t.get_number("new_value"), Some(28.0));

    let errors = notify.body.get_object("errors").unwrap();
    let e = errors.get_object("temp_warning_high").unwrap();
    assert_eq!(e.get_str("error"), Some("Value is not a number."));
    assert_eq!(e.get_str("value"), Some("hot"));

    // the malformed bound kept its previous value
    let t = monitor.sensor("temp").unwrap().thresholds();
    assert_eq!(t.outer.high, Some(40.0));
    assert_eq!(t.inner.high, Some(28.0));
}
