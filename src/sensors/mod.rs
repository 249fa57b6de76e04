//! Sensor peripherals, the driver side of the [`Measurement`]s.
//!
//! Chip-specific register protocols live in the drivers themselves; this
//! module only fixes the lifecycle every driver goes through:
//!
//! ```text
//!            initialize(first) ok + trial read ok
//!   stopped ────────────────────────────────────────▶ started
//!      ▲                                                 │
//!      └──────── read failed: clear values, reset ◀──────┘
//! ```
//!
//! While a peripheral is stopped its measurements stay undefined, which the
//! monitor treats as non-alerting.  `first` is true for the very first
//! attempt and for the first attempt after a failure following a good read,
//! so diagnostics are emitted once per outage instead of every poll.

pub mod multi;

use std::sync::Arc;

use log::{debug, warn};

use crate::measurement::Measurement;

pub use multi::MultiSensor;

/// Implemented by every sensor driver.
pub trait SensorPeripheral {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Bring the device up.  `first` marks an attempt whose failure should
    /// be reported.
    fn initialize(&mut self, first: bool) -> bool;

    /// Read the device and write its measurements.
    fn read_values(&mut self) -> bool;

    /// Prepare for re-initialisation after a failure.
    fn reset(&mut self) {}

    /// The measurements this peripheral writes, in a stable order.
    fn measurements(&self) -> &[Arc<Measurement>];

    fn clear_values(&self) {
        for m in self.measurements() {
            m.clear();
        }
    }
}

/// Lifecycle wrapper around a [`SensorPeripheral`].
#[derive(Debug)]
pub struct Peripheral<P> {
    device: P,
    started: bool,
    first: bool,
}

impl<P: SensorPeripheral> Peripheral<P> {
    pub fn new(device: P) -> Self {
        Self {
            device,
            started: false,
            first: true,
        }
    }

    /// Start the device if it is not running yet.  Returns whether it is.
    pub fn begin(&mut self) -> bool {
        if !self.started {
            let first = self.first;
            self.started = self.device.initialize(first);
            if self.started {
                self.started = self.device.read_values();
                if !self.started {
                    self.device.reset();
                }
            }
            if !self.started && first {
                warn!("sensor {}: not available", self.device.name());
            }
            self.first = false;
        }
        self.started
    }

    /// Poll the device.  On failure its measurements become undefined.
    pub fn read(&mut self) -> bool {
        if !self.begin() {
            self.device.clear_values();
            return false;
        }
        if self.device.read_values() {
            return true;
        }
        warn!("sensor {}: read failed", self.device.name());
        self.device.clear_values();
        self.device.reset();
        self.started = false;
        self.first = true;
        debug!("sensor {}: reset, will re-initialise", self.device.name());
        false
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn device(&self) -> &P {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut P {
        &mut self.device
    }

    pub fn measurements(&self) -> &[Arc<Measurement>] {
        self.device.measurements()
    }
}
