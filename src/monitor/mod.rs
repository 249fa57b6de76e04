//! Threshold monitoring across a fixed set of sensors.
//!
//! ```text
//!  drivers ──▶ Measurement ──▶ SensorMonitor ──┐
//!                                              ├──▶ Monitor::check_readings ──▶ Report
//!  drivers ──▶ Measurement ──▶ SensorMonitor ──┘
//! ```
//!
//! Sensors are evaluated in registration order, which is also the order of
//! the checks in the [`Report`] and of the fields in outbound events.
//! Evaluation is synchronous and allocation-free: the sensor list and the
//! report buffer are fixed-capacity and the report is reused every cycle.

pub mod level;
pub mod range;
pub mod report;
pub mod sensor;
pub mod thresholds;

use std::sync::Arc;

use log::info;

use crate::env::{ConfigSource, EnvironmentUpdate};
use crate::error::MonitorError;
use crate::measurement::Measurement;

pub use level::{AlertLevel, AlertSequence};
pub use range::{Range, ThresholdSide};
pub use report::{Report, SensorCheck};
pub use sensor::SensorMonitor;
pub use thresholds::{AlertThresholds, ThresholdReport};

/// Maximum number of sensors one monitor evaluates.
pub const MAX_SENSORS: usize = 16;

/// Owns the sensor monitors and the reusable report.
#[derive(Debug, Default)]
pub struct Monitor {
    sensors: heapless::Vec<SensorMonitor, MAX_SENSORS>,
    report: Report,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a measurement with no thresholds (never alerts until
    /// configured).
    pub fn add_sensor(&mut self, measurement: Arc<Measurement>) -> Result<(), MonitorError> {
        self.add_monitor(SensorMonitor::new(measurement))
    }

    pub fn add_sensors<I>(&mut self, measurements: I) -> Result<(), MonitorError>
    where
        I: IntoIterator<Item = Arc<Measurement>>,
    {
        measurements.into_iter().try_for_each(|m| self.add_sensor(m))
    }

    pub fn add_monitor(&mut self, monitor: SensorMonitor) -> Result<(), MonitorError> {
        let name = monitor.name();
        if name.len() > sensor::MAX_NAME_LEN {
            return Err(MonitorError::NameTooLong);
        }
        if self.sensor(name).is_some() {
            return Err(MonitorError::DuplicateName);
        }
        self.sensors
            .push(monitor)
            .map_err(|_| MonitorError::CapacityExceeded)
    }

    pub fn sensors(&self) -> impl Iterator<Item = &SensorMonitor> {
        self.sensors.iter()
    }

    pub fn sensor(&self, name: &str) -> Option<&SensorMonitor> {
        self.sensors.iter().find(|s| s.name() == name)
    }

    pub fn sensor_mut(&mut self, name: &str) -> Option<&mut SensorMonitor> {
        self.sensors.iter_mut().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Apply the same tolerance to every registered sensor.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        for s in &mut self.sensors {
            s.set_tolerance(tolerance);
        }
    }

    /// Reload every sensor's thresholds from `update`, in order.
    pub fn apply_config_update<S: ConfigSource>(
        &mut self,
        update: &mut EnvironmentUpdate<S>,
        dry_run: bool,
    ) {
        for s in &mut self.sensors {
            s.apply_config_update(update, dry_run);
        }
    }

    /// Evaluate every sensor and advance the alert sequence.
    pub fn check_readings(&mut self) -> &Report {
        self.report.begin_update();
        for s in &self.sensors {
            let (value, report) = s.check();
            self.report.update_sensor_reading(SensorCheck {
                name: s.name(),
                unit: s.measurement().unit(),
                value,
                report,
            });
        }
        self.report.end_update();

        match self.report.alert_sequence() {
            AlertSequence::First => info!("alert raised: {}", self.report),
            AlertSequence::Cleared => info!("alert cleared: {}", self.report),
            AlertSequence::None | AlertSequence::Ongoing => {}
        }
        &self.report
    }

    /// The report from the most recent cycle.
    pub fn report(&self) -> &Report {
        &self.report
    }
}
