//! Numeric bands with optional bounds.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a [`Range`] a value fell on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdSide {
    /// Inside the band (or the band has no limit on that side).
    #[default]
    None,
    Below,
    Above,
}

impl ThresholdSide {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Below => "lower",
            Self::Above => "upper",
        }
    }

    /// Human status label used in alert events.
    pub const fn status(self) -> &'static str {
        match self {
            Self::None => "ok",
            Self::Below => "low",
            Self::Above => "high",
        }
    }

    pub const fn is_breach(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ThresholdSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive band; an absent bound means "no limit on that side".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Range {
    /// No limits at all; classifies everything as within.
    pub const UNBOUNDED: Self = Self { low: None, high: None };

    pub const fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    pub const fn between(low: f64, high: f64) -> Self {
        Self::new(Some(low), Some(high))
    }

    /// Both bounds absent, or both present and equal.
    pub fn is_empty(&self) -> bool {
        match (self.low, self.high) {
            (None, None) => true,
            (Some(lo), Some(hi)) => lo == hi,
            _ => false,
        }
    }

    /// Classify `v`.  The lower bound is checked first.
    pub fn classify(&self, v: f64) -> ThresholdSide {
        if self.low.is_some_and(|lo| v < lo) {
            ThresholdSide::Below
        } else if self.high.is_some_and(|hi| v > hi) {
            ThresholdSide::Above
        } else {
            ThresholdSide::None
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if let Some(lo) = self.low {
            write!(f, "{lo}")?;
        }
        f.write_str(",")?;
        if let Some(hi) = self.high {
            write!(f, "{hi}")?;
        }
        f.write_str("]")
    }
}
