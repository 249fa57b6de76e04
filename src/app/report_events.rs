//! Publication policy: turns a [`Report`] into outbound events.
//!
//! Every report produces a monitor event on the monitoring stream.  While
//! an episode is in progress (or has just cleared) an alert event with the
//! per-sensor details follows on the alert stream.
//!
//! | sequence  | monitor event immediate | alert event | alert immediate |
//! |-----------|-------------------------|-------------|-----------------|
//! | `None`    | `always_sync`           | —           | —               |
//! | `First`   | yes                     | yes         | yes             |
//! | `Ongoing` | `always_sync`           | yes         | no              |
//! | `Cleared` | yes                     | yes         | yes             |
//!
//! Ongoing detail events are never expedited, which bounds uplink traffic
//! during a sustained alert.
//!
//! The monitoring stream's schema is registered lazily and retried on every
//! publish until it succeeds.  Data events go out whether or not the schema
//! is registered.

use log::{debug, warn};

use crate::config::ReportConfig;
use crate::env::{ConfigSource, EnvironmentUpdate};
use crate::monitor::{Monitor, Report, SensorMonitor};

use super::events::{EventBody, Schema, WireType};
use super::ports::EventSink;

pub const FIELD_ALERT_SEQUENCE: &str = "alert_seq";
pub const FIELD_ALERT_LEVEL: &str = "alert";
pub const FIELD_APP: &str = "app";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_VALUE: &str = "value";

/// Builds and sends monitor, alert and notify events.
#[derive(Debug)]
pub struct ReportEvents {
    config: ReportConfig,
    template_registered: bool,
}

impl ReportEvents {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            template_registered: false,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn is_registered(&self) -> bool {
        self.template_registered
    }

    /// Register the monitoring schema up front.
    pub fn begin(&mut self, monitor: &Monitor, sink: &mut impl EventSink) -> bool {
        self.register_schema(monitor.sensors().map(SensorMonitor::name), sink)
    }

    /// Publish the monitor's latest report.  Returns `true` only if every
    /// event was accepted.
    pub fn send_report(&mut self, monitor: &Monitor, sink: &mut impl EventSink) -> bool {
        self.register_schema(monitor.sensors().map(SensorMonitor::name), sink);

        let report = monitor.report();
        let monitor_ok = self.send_monitor_event(report, sink);
        let alert_ok = if report.alert_sequence().is_alerting() {
            self.send_alert_event(report, sink)
        } else {
            true
        };
        monitor_ok && alert_ok
    }

    /// Publish the outcome of a configuration reload.  Nothing to report
    /// counts as success.
    pub fn notify_update<S: ConfigSource>(
        &mut self,
        update: &EnvironmentUpdate<S>,
        sink: &mut impl EventSink,
    ) -> bool {
        if !update.has_content() {
            return true;
        }
        let body = update.to_body();
        publish(sink, &self.config.notify_stream, &body, false)
    }

    /// Schema of the monitoring stream for the given sensor names.
    pub fn monitor_schema<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Schema {
        let mut schema = Schema::new();
        schema.add(FIELD_ALERT_SEQUENCE, WireType::String);
        schema.add(FIELD_ALERT_LEVEL, WireType::String);
        for name in names {
            schema.add(name, WireType::Float32);
        }
        if self.config.app_name.is_some() {
            schema.add(FIELD_APP, WireType::String);
        }
        if let Some(extra) = self.config.extra_schema {
            extra(&mut schema);
        }
        schema
    }

    /// Body of the monitoring event: meta fields, then every defined value.
    pub fn build_monitor_event(&self, report: &Report) -> EventBody {
        let mut body = meta_fields(report);
        for check in report.checks() {
            if let Some(v) = check.value {
                body.add_number(check.name, v);
            }
        }
        self.add_product_fields(&mut body);
        body
    }

    /// Body of the alert event: meta fields, then one object per sensor.
    /// Only sensors that breached a threshold carry a level.
    pub fn build_alert_event(&self, report: &Report) -> EventBody {
        let mut body = meta_fields(report);
        self.add_product_fields(&mut body);
        for check in report.checks() {
            let mut item = EventBody::new();
            if check.report.level.is_alert() {
                item.add_str(FIELD_ALERT_LEVEL, check.report.level.label());
            }
            item.add_str(FIELD_STATUS, check.report.side.status());
            if let Some(v) = check.value {
                item.add_number(FIELD_VALUE, v);
            }
            body.add_object(check.name, item);
        }
        body
    }

    // ── Internal ──────────────────────────────────────────────

    fn register_schema<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.template_registered {
            return true;
        }
        let schema = self.monitor_schema(names);
        self.template_registered = sink.register_schema(&self.config.monitor_stream, &schema);
        if !self.template_registered {
            debug!("unable to register schema for {}", self.config.monitor_stream);
        }
        self.template_registered
    }

    fn send_monitor_event(&self, report: &Report, sink: &mut impl EventSink) -> bool {
        let immediate = report.is_immediate() || self.config.always_sync;
        let body = self.build_monitor_event(report);
        publish(sink, &self.config.monitor_stream, &body, immediate)
    }

    fn send_alert_event(&self, report: &Report, sink: &mut impl EventSink) -> bool {
        let body = self.build_alert_event(report);
        publish(sink, &self.config.alert_stream, &body, report.is_immediate())
    }

    fn add_product_fields(&self, body: &mut EventBody) {
        if let Some(app) = &self.config.app_name {
            body.add_str(FIELD_APP, app);
        }
        if let Some(extra) = self.config.extra_fields {
            extra(body);
        }
    }
}

fn meta_fields(report: &Report) -> EventBody {
    let mut body = EventBody::new();
    if report.alert_sequence().is_alerting() {
        body.add_str(FIELD_ALERT_SEQUENCE, report.alert_sequence().label());
    }
    if report.alert_level().is_alert() {
        body.add_str(FIELD_ALERT_LEVEL, report.alert_level().label());
    }
    body
}

fn publish(sink: &mut impl EventSink, stream: &str, body: &EventBody, immediate: bool) -> bool {
    let ok = sink.publish(stream, body, immediate);
    if !ok {
        warn!("publish to {stream} failed");
    }
    ok
}
