//! Threshold-based multi-sensor alerting and event reporting.
//!
//! Sensors publish readings into shared [`Measurement`]s.  A [`Monitor`]
//! classifies each against its two-band [`AlertThresholds`], tracks alert
//! episodes as an [`AlertSequence`], and produces a [`Report`] that
//! [`ReportEvents`] turns into monitor, alert and notify events.
//! Thresholds are reloaded from remote environment variables at runtime.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod env;
pub mod error;
pub mod measurement;
pub mod monitor;
pub mod sensors;

pub use app::ports::{EnvironmentPort, EventSink};
pub use app::report_events::ReportEvents;
pub use app::service::MonitorService;
pub use config::AppConfig;
pub use env::{ConfigSource, EnvironmentUpdate};
pub use error::{Error, Result};
pub use measurement::Measurement;
pub use monitor::{
    AlertLevel, AlertSequence, AlertThresholds, Monitor, Range, Report, SensorMonitor,
};
