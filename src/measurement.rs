//! Named numeric readings shared between sensor drivers and the monitor.
//!
//! A [`Measurement`] is created once at startup and wrapped in an `Arc`:
//! the driver side overwrites its value every poll, the monitor side reads
//! it during evaluation.  The value lives in a single `AtomicU64` holding
//! the `f64` bit pattern, so a reader never observes a torn write even
//! when the driver runs on another thread.
//!
//! "No reading yet" is the NaN sentinel [`Measurement::UNDEFINED`].

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// A named, optionally unit-tagged reading that may be undefined.
#[derive(Debug)]
pub struct Measurement {
    name: &'static str,
    unit: Option<&'static str>,
    bits: AtomicU64,
}

impl Measurement {
    /// Sentinel meaning "no reading yet".
    pub const UNDEFINED: f64 = f64::NAN;

    /// A measurement with no value yet.
    pub fn new(name: &'static str, unit: Option<&'static str>) -> Self {
        Self::with_value(name, unit, Self::UNDEFINED)
    }

    pub fn with_value(name: &'static str, unit: Option<&'static str>, value: f64) -> Self {
        Self {
            name,
            unit,
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.unit
    }

    /// Raw stored value; NaN when undefined.
    pub fn raw_value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// The current reading, or `None` while undefined.
    pub fn value(&self) -> Option<f64> {
        let v = self.raw_value();
        if v.is_nan() { None } else { Some(v) }
    }

    /// Overwrite the reading.  Writing NaN is equivalent to [`clear`](Self::clear).
    pub fn set_value(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Return to the undefined state (e.g. after a failed driver read).
    pub fn clear(&self) {
        self.set_value(Self::UNDEFINED);
    }

    pub fn has_value(&self) -> bool {
        !self.raw_value().is_nan()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        match self.value() {
            Some(v) => {
                write!(f, "{v}")?;
                if let Some(unit) = self.unit {
                    write!(f, " {unit}")?;
                }
                Ok(())
            }
            None => f.write_str("N/A"),
        }
    }
}
