//! Application core — publication policy and orchestration, zero I/O.
//!
//! [`report_events`] turns monitor reports into outbound events and
//! [`service`] ties a monitor, its configuration updates and the report
//! cadence together.  All interaction with the gateway happens through the
//! **port traits** in [`ports`], keeping this layer testable with mocks.

pub mod events;
pub mod ports;
pub mod report_events;
pub mod service;
