//! Alert severity and the per-cycle alert-sequence state.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Severity of one measurement, or of a whole cycle (max across sensors).
///
/// Declaration order is severity order, so `Ord` gives "more severe wins".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub const fn is_alert(self) -> bool {
        !matches!(self, Self::Normal)
    }

    pub fn highest(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where in an alert episode the current cycle sits.
///
/// `First` and `Cleared` last exactly one cycle.
///
/// ```text
///   previous   alerting   quiet
///   ────────   ────────   ───────
///   None       First      None
///   First      Ongoing    Cleared
///   Ongoing    Ongoing    Cleared
///   Cleared    First      None
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSequence {
    /// Regular report, nothing alerting.
    #[default]
    None,
    /// First cycle of a new episode.
    First,
    /// Episode continues.
    Ongoing,
    /// First quiet cycle after an episode.
    Cleared,
}

impl AlertSequence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::First => "first",
            Self::Ongoing => "ongoing",
            Self::Cleared => "cleared",
        }
    }

    /// Edge states that warrant expedited delivery.
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::First | Self::Cleared)
    }

    /// Anything other than a regular report.
    pub const fn is_alerting(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Inside an episode (the only memory the state machine carries).
    pub const fn is_active_alert(self) -> bool {
        matches!(self, Self::First | Self::Ongoing)
    }

    /// Advance one evaluation cycle.
    pub const fn next(self, alerting: bool) -> Self {
        match (self.is_active_alert(), alerting) {
            (true, true) => Self::Ongoing,
            (false, true) => Self::First,
            (true, false) => Self::Cleared,
            (false, false) => Self::None,
        }
    }
}

impl fmt::Display for AlertSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
