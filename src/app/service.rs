//! Application service: one product's monitoring loop body.
//!
//! [`MonitorService`] owns the monitor, the publication policy and the
//! environment poller.  It never sleeps or spawns; the host calls it with a
//! monotonic millisecond clock and the port adapters, and every call runs
//! to completion.
//!
//! ```text
//!  EnvironmentPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                      │      MonitorService       │
//!   Measurements   ──▶ │  Monitor · ReportEvents   │
//!                      └──────────────────────────┘
//! ```
//!
//! Reporting cadence: a report is published on every tick whose sequence is
//! an edge (`First`/`Cleared`), after a failed publish, and otherwise once
//! per report interval.

use std::collections::HashMap;

use log::{debug, info};

use crate::config::{AppConfig, TimingConfig};
use crate::env::EnvironmentUpdate;
use crate::env::poll::EnvironmentPoll;
use crate::monitor::{Monitor, Report};

use super::ports::{EnvironmentPort, EventSink};
use super::report_events::ReportEvents;

pub type EnvVars = HashMap<String, String>;

pub struct MonitorService {
    monitor: Monitor,
    events: ReportEvents,
    env_poll: EnvironmentPoll,
    timing: TimingConfig,
    last_report_ms: Option<u64>,
    last_env_poll_ms: Option<u64>,
    /// Last publish failed; report again on the next tick.
    retry_pending: bool,
    tick_count: u64,
}

impl MonitorService {
    /// Wrap a populated monitor.  The configured tolerance is applied to
    /// every sensor.
    pub fn new(config: AppConfig, mut monitor: Monitor) -> Self {
        monitor.set_tolerance(config.monitor.tolerance);
        Self {
            monitor,
            events: ReportEvents::new(config.report),
            env_poll: EnvironmentPoll::new(),
            timing: config.timing,
            last_report_ms: None,
            last_env_poll_ms: None,
            retry_pending: false,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Register the event schema.  A failure here is retried on publish.
    pub fn start(&mut self, sink: &mut impl EventSink) -> bool {
        let ok = self.events.begin(&self.monitor, sink);
        info!(
            "monitor service started: {} sensors, schema registered={}",
            self.monitor.len(),
            ok
        );
        ok
    }

    /// Load the environment unconditionally (startup) and apply it.
    pub fn begin_environment(
        &mut self,
        port: &mut impl EnvironmentPort,
        sink: &mut impl EventSink,
    ) -> Option<bool> {
        let vars = self.env_poll.begin(port)?;
        Some(self.environment_updated(vars, sink))
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Evaluate all sensors and publish if a report is due.
    ///
    /// Returns `None` when nothing was published, else the publish result.
    pub fn tick(&mut self, now_ms: u64, sink: &mut impl EventSink) -> Option<bool> {
        self.tick_count += 1;
        let report = self.monitor.check_readings();
        debug!("tick {}: {}", self.tick_count, report);

        let interval = self.timing.report_interval_ms;
        let due = report.is_immediate()
            || self.retry_pending
            || self
                .last_report_ms
                .is_none_or(|t| now_ms.saturating_sub(t) >= interval);
        if !due {
            return None;
        }

        let ok = self.events.send_report(&self.monitor, sink);
        self.retry_pending = !ok;
        if ok {
            self.last_report_ms = Some(now_ms);
        }
        Some(ok)
    }

    // ── Configuration ─────────────────────────────────────────

    /// Apply an environment snapshot to the thresholds and publish what
    /// changed or was rejected.
    pub fn environment_updated(&mut self, vars: EnvVars, sink: &mut impl EventSink) -> bool {
        let mut update = EnvironmentUpdate::new(vars);
        self.monitor.apply_config_update(&mut update, false);
        if update.has_content() {
            info!(
                "environment applied: {} changes, {} errors",
                update.changes().len(),
                update.errors().len()
            );
        }
        self.events.notify_update(&update, sink)
    }

    /// What `environment_updated` would do, without touching thresholds or
    /// publishing.
    pub fn preview_environment(&mut self, vars: EnvVars) -> EnvironmentUpdate<EnvVars> {
        let mut update = EnvironmentUpdate::new(vars);
        self.monitor.apply_config_update(&mut update, true);
        update
    }

    /// Check the environment for changes if the poll interval has elapsed.
    pub fn poll_environment(
        &mut self,
        now_ms: u64,
        port: &mut impl EnvironmentPort,
        sink: &mut impl EventSink,
    ) -> Option<bool> {
        let interval = self.timing.poll_environment_ms;
        if self
            .last_env_poll_ms
            .is_some_and(|t| now_ms.saturating_sub(t) < interval)
        {
            return None;
        }
        self.last_env_poll_ms = Some(now_ms);
        let vars = self.env_poll.poll(port)?;
        Some(self.environment_updated(vars, sink))
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut Monitor {
        &mut self.monitor
    }

    /// Report from the most recent tick.
    pub fn report(&self) -> &Report {
        self.monitor.report()
    }

    pub fn report_events(&self) -> &ReportEvents {
        &self.events
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Total ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
