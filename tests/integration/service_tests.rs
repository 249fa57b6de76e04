//! Integration tests for the MonitorService orchestration loop.
//!
//! Verify report cadence, retry after a failed publish, and environment
//! polling end to end against the recording sink and a mock environment.

use std::sync::Arc;

use alertwatch::app::service::MonitorService;
use alertwatch::config::AppConfig;
use alertwatch::measurement::Measurement;
use alertwatch::monitor::{AlertSequence, Monitor};

use crate::mock_sink::{MockEnvironment, RecordingSink, vars};

const SENSOR_MS: u64 = 15_000;
const REPORT_MS: u64 = 300_000;

fn make_service() -> (MonitorService, Arc<Measurement>, RecordingSink) {
    let temp = Arc::new(Measurement::with_value("temp", Some("C"), 20.0));
    let mut monitor = Monitor::new();
    monitor.add_sensor(Arc::clone(&temp)).unwrap();
    let mut svc = MonitorService::new(AppConfig::default(), monitor);
    let mut sink = RecordingSink::new();
    assert!(svc.start(&mut sink));
    (svc, temp, sink)
}

fn configure(svc: &mut MonitorService, sink: &mut RecordingSink) {
    let env = vars(&[
        ("temp_normal_low", "10"),
        ("temp_normal_high", "30"),
        ("temp_warning_low", "0"),
        ("temp_warning_high", "40"),
    ]);
    assert!(svc.environment_updated(env, sink));
}

// ── Report cadence ────────────────────────────────────────────

#[test]
fn alert_edges_report_between_routine_intervals() {
    let (mut svc, temp, mut sink) = make_service();
    configure(&mut svc, &mut sink);
    sink.clear();

    assert_eq!(svc.tick(0, &mut sink), Some(true), "first tick always reports");

    temp.set_value(35.0);
    assert_eq!(svc.tick(SENSOR_MS, &mut sink), Some(true));
    assert_eq!(svc.report().alert_sequence(), AlertSequence::First);

    assert_eq!(svc.tick(2 * SENSOR_MS, &mut sink), None, "ongoing waits for the interval");
    assert_eq!(svc.report().alert_sequence(), AlertSequence::Ongoing);

    assert_eq!(svc.tick(SENSOR_MS + REPORT_MS, &mut sink), Some(true));

    temp.set_value(20.0);
    assert_eq!(svc.tick(SENSOR_MS + REPORT_MS + SENSOR_MS, &mut sink), Some(true));
    assert_eq!(svc.report().alert_sequence(), AlertSequence::Cleared);

    let data = sink.on("data.qo");
    assert_eq!(data.len(), 4);
    assert_eq!(
        data.iter().map(|e| e.immediate).collect::<Vec<_>>(),
        [false, true, false, true]
    );
    assert_eq!(sink.on("alert.qo").len(), 3);
}

#[test]
fn failed_publish_is_retried_on_next_tick() {
    let (mut svc, _temp, mut sink) = make_service();
    sink.failing_streams.push("data.qo".into());

    assert_eq!(svc.tick(0, &mut sink), Some(false));
    sink.failing_streams.clear();
    assert_eq!(svc.tick(SENSOR_MS, &mut sink), Some(true));
    assert_eq!(svc.tick(2 * SENSOR_MS, &mut sink), None);
    assert_eq!(sink.on("data.qo").len(), 2);
}

// ── Environment ───────────────────────────────────────────────

#[test]
fn environment_poll_fetches_only_after_modification() {
    let (mut svc, temp, mut sink) = make_service();
    let mut env = MockEnvironment::new(1, &[("temp_normal_high", "30")]);

    assert_eq!(svc.begin_environment(&mut env, &mut sink), Some(true));
    assert_eq!(env.fetches, 1);
    assert_eq!(sink.on("notify.qo").len(), 1);

    // unchanged
    assert_eq!(svc.poll_environment(0, &mut env, &mut sink), None);
    assert_eq!(env.fetches, 1);

    env.set(2, &[("temp_normal_high", "15")]);
    assert_eq!(svc.poll_environment(1_000, &mut env, &mut sink), None, "interval not elapsed");
    assert_eq!(svc.poll_environment(REPORT_MS, &mut env, &mut sink), Some(true));
    assert_eq!(env.fetches, 2);

    let notify = sink.last_on("notify.qo").unwrap();
    let change = notify
        .body
        .get_object("updates")
        .and_then(|u| u.get_object("temp_normal_high"))
        .unwrap();
    assert_eq!(change.get_number("old_value"), Some(30.0));
    assert_eq!(change.get_number("new_value"), Some(15.0));

    // 20 is now above the normal band
    temp.set_value(20.0);
    svc.tick(REPORT_MS, &mut sink);
    assert_eq!(svc.report().alert_sequence(), AlertSequence::First);
}

#[test]
fn preview_does_not_touch_thresholds() {
    let (mut svc, _temp, mut sink) = make_service();
    configure(&mut svc, &mut sink);
    sink.clear();

    let preview = svc.preview_environment(vars(&[
        ("temp_normal_low", "10"),
        ("temp_normal_high", "25"),
        ("temp_warning_low", "0"),
        ("temp_warning_high", "40"),
    ]));
    assert_eq!(preview.changes().len(), 1);
    assert!(sink.events.is_empty());
    let t = svc.monitor().sensor("temp").unwrap().thresholds();
    assert_eq!(t.inner.high, Some(30.0));
}
