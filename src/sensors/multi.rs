//! A device that produces several measurements at once.

use std::sync::Arc;

use crate::measurement::Measurement;

/// Fixed set of `N` measurements written together by one driver.
#[derive(Debug, Clone)]
pub struct MultiSensor<const N: usize> {
    values: [Arc<Measurement>; N],
}

impl<const N: usize> MultiSensor<N> {
    /// Build from `(name, unit)` pairs; every value starts undefined.
    pub fn new(specs: [(&'static str, Option<&'static str>); N]) -> Self {
        Self {
            values: specs.map(|(name, unit)| Arc::new(Measurement::new(name, unit))),
        }
    }

    /// Panics if `index >= N`; indices are driver constants.
    pub fn set_value(&self, index: usize, value: f64) {
        self.values[index].set_value(value);
    }

    pub fn clear_values(&self) {
        for m in &self.values {
            m.clear();
        }
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Measurement>> {
        self.values.get(index)
    }

    pub fn measurements(&self) -> &[Arc<Measurement>] {
        &self.values
    }
}
