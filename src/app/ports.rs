//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ReportEvents / MonitorService (domain)
//! ```
//!
//! Driven adapters (telemetry gateway, environment store) implement these
//! traits.  The domain consumes them via generics, so evaluation and the
//! publication policy never touch a transport directly.
//!
//! Neither port reports *why* something failed: the engine's only reaction
//! to a failure is to try again on the next cycle with fresh state, so a
//! `bool` / `Option` is all it needs.

use std::collections::HashMap;

use super::events::{EventBody, Schema};

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → telemetry gateway)
// ───────────────────────────────────────────────────────────────

/// Outbound event sink.
pub trait EventSink {
    /// Register the field layout of `stream`.  May be called repeatedly
    /// until it succeeds.
    fn register_schema(&mut self, stream: &str, schema: &Schema) -> bool;

    /// Queue one event.  `immediate` asks for expedited delivery; otherwise
    /// the sink may batch.
    fn publish(&mut self, stream: &str, body: &EventBody, immediate: bool) -> bool;
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn register_schema(&mut self, stream: &str, schema: &Schema) -> bool {
        (**self).register_schema(stream, schema)
    }

    fn publish(&mut self, stream: &str, body: &EventBody, immediate: bool) -> bool {
        (**self).publish(stream, body, immediate)
    }
}

// ───────────────────────────────────────────────────────────────
// Environment port (driven adapter: remote key/value config → domain)
// ───────────────────────────────────────────────────────────────

/// Remote environment variables carrying threshold configuration.
pub trait EnvironmentPort {
    /// Modification time of the current variable set, `None` if unreachable.
    fn modified(&mut self) -> Option<i64>;

    /// All variables with their modification time, `None` if unreachable.
    fn fetch(&mut self) -> Option<(i64, HashMap<String, String>)>;
}
