//! One measurement bound to its alert thresholds.

use core::fmt;
use core::fmt::Write as _;
use std::sync::Arc;

use log::{info, warn};

use crate::env::{ConfigSource, EnvironmentUpdate};
use crate::error::ConfigValueError;
use crate::measurement::Measurement;

use super::range::Range;
use super::thresholds::{AlertThresholds, ThresholdReport};

/// Default tolerance below which a configured bound counts as unchanged.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Longest measurement name that still fits `<name>_warning_high` in a
/// [`ConfigKey`].
pub const MAX_NAME_LEN: usize = 48;

/// Fixed-capacity configuration key.
pub type ConfigKey = heapless::String<64>;

const BAND_INNER: &str = "normal";
const BAND_OUTER: &str = "warning";
const SIDE_LOW: &str = "low";
const SIDE_HIGH: &str = "high";

/// Applies thresholds to one shared [`Measurement`].
#[derive(Debug, Clone)]
pub struct SensorMonitor {
    measurement: Arc<Measurement>,
    thresholds: AlertThresholds,
    tolerance: f64,
}

impl SensorMonitor {
    pub fn new(measurement: Arc<Measurement>) -> Self {
        Self::with_thresholds(measurement, AlertThresholds::default())
    }

    pub fn with_thresholds(measurement: Arc<Measurement>, thresholds: AlertThresholds) -> Self {
        Self {
            measurement,
            thresholds,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance.abs();
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn name(&self) -> &'static str {
        self.measurement.name()
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: AlertThresholds) {
        self.thresholds = thresholds;
    }

    /// Classify the current reading.  An undefined reading is normal.
    pub fn check(&self) -> (Option<f64>, ThresholdReport) {
        match self.measurement.value() {
            Some(v) => (Some(v), self.thresholds.report_value(v)),
            None => (None, ThresholdReport::NORMAL),
        }
    }

    /// Reload the four bounds from `update`.
    ///
    /// A missing key clears the bound; a parseable value that differs by at
    /// least the tolerance replaces it; anything else is reported as an
    /// error and the bound is kept.  With `dry_run` the notifications are
    /// the same but nothing is stored.
    pub fn apply_config_update<S: ConfigSource>(
        &mut self,
        update: &mut EnvironmentUpdate<S>,
        dry_run: bool,
    ) {
        let name = self.name();
        let tolerance = self.tolerance;
        let AlertThresholds { inner, outer } = &mut self.thresholds;
        for (band, range) in [(BAND_INNER, inner), (BAND_OUTER, outer)] {
            reload_range(update, name, band, range, tolerance, dry_run);
        }
    }
}

impl fmt::Display for SensorMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.measurement, self.thresholds)
    }
}

/// `<name>_<band>_<side>`.  Fails for names longer than [`MAX_NAME_LEN`].
pub fn config_key(name: &str, band: &str, side: &str) -> Result<ConfigKey, ConfigValueError> {
    let mut key = ConfigKey::new();
    write!(key, "{name}_{band}_{side}").map_err(|_| ConfigValueError::KeyTooLong)?;
    Ok(key)
}

/// Parse a threshold value the way the device firmware always has: leading
/// whitespace is skipped, the rest must be consumed entirely.
pub fn parse_bound(raw: &str) -> Result<f64, ConfigValueError> {
    match raw.trim_start().parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(ConfigValueError::NotANumber),
    }
}

fn reload_range<S: ConfigSource>(
    update: &mut EnvironmentUpdate<S>,
    name: &str,
    band: &str,
    range: &mut Range,
    tolerance: f64,
    dry_run: bool,
) {
    for (side, bound) in [(SIDE_LOW, &mut range.low), (SIDE_HIGH, &mut range.high)] {
        let key = match config_key(name, band, side) {
            Ok(key) => key,
            Err(e) => {
                let key = format!("{name}_{band}_{side}");
                let raw = update.get(&key).unwrap_or_default().to_owned();
                warn!("config {key}: {e}");
                update.notify_error(&key, e.message(), &raw);
                continue;
            }
        };
        let next = match update.get(&key) {
            None => None,
            Some(raw) => match parse_bound(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    let raw = raw.to_owned();
                    warn!("config {key}: {e} ({raw:?})");
                    update.notify_error(&key, e.message(), &raw);
                    continue;
                }
            },
        };
        if same_bound(*bound, next, tolerance) {
            continue;
        }
        update.notify_changed(&key, *bound, next);
        if !dry_run {
            info!("config {key}: {bound:?} -> {next:?}");
            *bound = next;
        }
    }
}

fn same_bound(current: Option<f64>, next: Option<f64>, tolerance: f64) -> bool {
    match (current, next) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b || (a - b).abs() < tolerance,
        _ => false,
    }
}
