//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each event as one JSON line to the
//! logger.  Useful on a bench without a gateway attached, and as the
//! reference for a real uplink adapter.

use log::{info, warn};

use crate::app::events::{EventBody, Schema};
use crate::app::ports::EventSink;

/// Adapter that logs every schema and event.  Never fails.
#[derive(Debug, Default)]
pub struct LogEventSink {
    published: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged so far.
    pub fn published(&self) -> u32 {
        self.published
    }
}

impl EventSink for LogEventSink {
    fn register_schema(&mut self, stream: &str, schema: &Schema) -> bool {
        match serde_json::to_string(schema) {
            Ok(json) => info!("SCHEMA | {stream} | {json}"),
            Err(e) => warn!("SCHEMA | {stream} | unserializable: {e}"),
        }
        true
    }

    fn publish(&mut self, stream: &str, body: &EventBody, immediate: bool) -> bool {
        let tag = if immediate { "SYNC " } else { "QUEUE" };
        match serde_json::to_string(body) {
            Ok(json) => info!("{tag} | {stream} | {json}"),
            Err(e) => warn!("{tag} | {stream} | unserializable: {e}"),
        }
        self.published += 1;
        true
    }
}
