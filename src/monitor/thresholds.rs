//! Concentric alert bands.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::level::AlertLevel;
use super::range::{Range, ThresholdSide};

/// Result of classifying one value: which side was breached, and how badly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdReport {
    pub side: ThresholdSide,
    pub level: AlertLevel,
}

impl ThresholdReport {
    pub const NORMAL: Self = Self {
        side: ThresholdSide::None,
        level: AlertLevel::Normal,
    };

    pub const fn is_breach(&self) -> bool {
        self.side.is_breach()
    }
}

impl fmt::Display for ThresholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if self.side.is_breach() {
            write!(f, ": threshold {}", self.side)?;
        }
        Ok(())
    }
}

/// Two bands per measurement.
///
/// Breaching `outer` is `Critical`; within `outer` but breaching `inner`
/// is `Warning`; otherwise `Normal`.  Configuration keys call these the
/// `normal` (inner) and `warning` (outer) bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub inner: Range,
    pub outer: Range,
}

impl AlertThresholds {
    pub const fn new(inner: Range, outer: Range) -> Self {
        Self { inner, outer }
    }

    /// Classify a defined value.  `outer` short-circuits `inner`.
    pub fn report_value(&self, v: f64) -> ThresholdReport {
        let side = self.outer.classify(v);
        if side.is_breach() {
            return ThresholdReport {
                side,
                level: AlertLevel::Critical,
            };
        }
        let side = self.inner.classify(v);
        if side.is_breach() {
            return ThresholdReport {
                side,
                level: AlertLevel::Warning,
            };
        }
        ThresholdReport::NORMAL
    }
}

impl fmt::Display for AlertThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if !self.inner.is_empty() {
            write!(f, "normal{}", self.inner)?;
            sep = " ";
        }
        if !self.outer.is_empty() {
            write!(f, "{sep}warning{}", self.outer)?;
        }
        Ok(())
    }
}
