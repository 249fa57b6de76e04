//! Product configuration
//!
//! Everything that varies between products built on the engine is data:
//! event stream names, the sync policy, an optional app tag and the polling
//! cadence.  Defaults match the stock firmware; a product overrides them
//! from a JSON document at startup.

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::app::events::{EventBody, Schema};
use crate::monitor::sensor::DEFAULT_TOLERANCE;

/// Hook for product-specific fields added to every monitor and alert event.
pub type ExtraFieldsFn = fn(&mut EventBody);

/// Registers the wire types of the fields [`ExtraFieldsFn`] adds.
pub type ExtraSchemaFn = fn(&mut Schema);

/// Where and how reports are published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Routine readings plus sequence/level meta fields.
    pub monitor_stream: String,
    /// Per-sensor breach details.
    pub alert_stream: String,
    /// Configuration change acknowledgements.
    pub notify_stream: String,
    /// Request immediate delivery for every monitor event, not only alert edges.
    pub always_sync: bool,
    /// When set, an `app` string field is registered and sent.
    pub app_name: Option<String>,
    #[serde(skip)]
    pub extra_fields: Option<ExtraFieldsFn>,
    #[serde(skip)]
    pub extra_schema: Option<ExtraSchemaFn>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            monitor_stream: "data.qo".into(),
            alert_stream: "alert.qo".into(),
            notify_stream: "notify.qo".into(),
            always_sync: false,
            app_name: None,
            extra_fields: None,
            extra_schema: None,
        }
    }
}

/// Polling cadence for [`MonitorService`](crate::app::service::MonitorService).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Sensor read interval (milliseconds).  Read by the host through
    /// [`MonitorService::timing`](crate::app::service::MonitorService::timing)
    /// to pace `Peripheral::read` and `tick`; the service itself does not
    /// schedule sensor reads.
    pub poll_sensors_ms: u64,
    /// Environment change check interval (milliseconds)
    pub poll_environment_ms: u64,
    /// Routine report interval (milliseconds)
    pub report_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_sensors_ms: 15_000,        // 15 s
            poll_environment_ms: 300_000,   // 5 min
            report_interval_ms: 300_000,    // 5 min
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Smallest threshold difference treated as a change.
    pub tolerance: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Complete product configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub timing: TimingConfig,
    pub monitor: MonitorConfig,
}

impl AppConfig {
    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("parsing product configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let r = &self.report;
        for (field, name) in [
            ("monitor_stream", &r.monitor_stream),
            ("alert_stream", &r.alert_stream),
            ("notify_stream", &r.notify_stream),
        ] {
            ensure!(!name.is_empty(), "report.{field} must not be empty");
        }
        ensure!(self.timing.poll_sensors_ms > 0, "timing.poll_sensors_ms must be > 0");
        ensure!(
            self.monitor.tolerance.is_finite() && self.monitor.tolerance >= 0.0,
            "monitor.tolerance must be a finite, non-negative number"
        );
        Ok(())
    }
}
