//! Output of one evaluation cycle.

use core::fmt;

use log::warn;

use super::MAX_SENSORS;
use super::level::{AlertLevel, AlertSequence};
use super::thresholds::ThresholdReport;

/// Classification of one sensor in one cycle.  The value is copied out of
/// the shared measurement at check time, so publishing sees exactly what
/// was evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCheck {
    pub name: &'static str,
    pub unit: Option<&'static str>,
    pub value: Option<f64>,
    pub report: ThresholdReport,
}

impl SensorCheck {
    pub fn level(&self) -> AlertLevel {
        self.report.level
    }
}

impl fmt::Display for SensorCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}: {} {}", self.name, v, self.report),
            None => write!(f, "{}: N/A {}", self.name, self.report),
        }
    }
}

/// Per-sensor checks, the worst level, and the alert sequence.
///
/// The check buffer has fixed capacity and is reused across cycles; only
/// `alert_sequence` carries over from one cycle to the next.
#[derive(Debug, Clone, Default)]
pub struct Report {
    checks: heapless::Vec<SensorCheck, MAX_SENSORS>,
    alert_level: AlertLevel,
    alert_sequence: AlertSequence,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checks(&self) -> &[SensorCheck] {
        &self.checks
    }

    pub fn check(&self, name: &str) -> Option<&SensorCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn alert_level(&self) -> AlertLevel {
        self.alert_level
    }

    pub fn alert_sequence(&self) -> AlertSequence {
        self.alert_sequence
    }

    /// Should this report bypass batching?
    pub fn is_immediate(&self) -> bool {
        self.alert_sequence.is_immediate()
    }

    pub fn begin_update(&mut self) {
        self.checks.clear();
        self.alert_level = AlertLevel::Normal;
    }

    /// Append one check and fold its level into the running maximum.
    ///
    /// The buffer is sized to the monitor's capacity, so a push can only
    /// fail if a caller drives the report directly past that; the check is
    /// then dropped with a warning but still counts toward the level.
    pub fn update_sensor_reading(&mut self, check: SensorCheck) {
        self.alert_level = self.alert_level.highest(check.level());
        if let Err(dropped) = self.checks.push(check) {
            warn!("report full ({MAX_SENSORS} checks), dropping {}", dropped.name);
        }
    }

    pub fn end_update(&mut self) {
        self.alert_sequence = self.alert_sequence.next(self.alert_level.is_alert());
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.alert_level, self.alert_sequence)?;
        for check in &self.checks {
            write!(f, "; {check}")?;
        }
        Ok(())
    }
}
