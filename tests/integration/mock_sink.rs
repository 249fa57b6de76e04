//! Mock adapters for integration tests.
//!
//! Records every schema registration and published event so tests can
//! assert on the full outbound history, and lets a test script failures.

use std::collections::HashMap;

use alertwatch::app::events::{EventBody, Schema};
use alertwatch::app::ports::{EnvironmentPort, EventSink};

// ── Published event record ────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Published {
    pub stream: String,
    pub body: EventBody,
    pub immediate: bool,
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub schemas: Vec<(String, Schema)>,
    pub registration_attempts: usize,
    pub events: Vec<Published>,
    /// Fail this many registrations before accepting one.
    pub fail_registrations: usize,
    /// Streams whose publishes are rejected.
    pub failing_streams: Vec<String>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(stream: &str) -> Self {
        Self {
            failing_streams: vec![stream.to_owned()],
            ..Self::default()
        }
    }

    pub fn on(&self, stream: &str) -> Vec<&Published> {
        self.events.iter().filter(|e| e.stream == stream).collect()
    }

    pub fn last_on(&self, stream: &str) -> Option<&Published> {
        self.events.iter().rev().find(|e| e.stream == stream)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn register_schema(&mut self, stream: &str, schema: &Schema) -> bool {
        self.registration_attempts += 1;
        if self.fail_registrations > 0 {
            self.fail_registrations -= 1;
            return false;
        }
        self.schemas.push((stream.to_owned(), schema.clone()));
        true
    }

    fn publish(&mut self, stream: &str, body: &EventBody, immediate: bool) -> bool {
        self.events.push(Published {
            stream: stream.to_owned(),
            body: body.clone(),
            immediate,
        });
        !self.failing_streams.iter().any(|s| s == stream)
    }
}

// ── MockEnvironment ───────────────────────────────────────────

pub struct MockEnvironment {
    pub modified: Option<i64>,
    pub vars: HashMap<String, String>,
    pub fetches: usize,
}

#[allow(dead_code)]
impl MockEnvironment {
    pub fn new(modified: i64, pairs: &[(&str, &str)]) -> Self {
        Self {
            modified: Some(modified),
            vars: vars(pairs),
            fetches: 0,
        }
    }

    /// Replace the variable set and bump the modification time.
    pub fn set(&mut self, modified: i64, pairs: &[(&str, &str)]) {
        self.modified = Some(modified);
        self.vars = vars(pairs);
    }
}

impl EnvironmentPort for MockEnvironment {
    fn modified(&mut self) -> Option<i64> {
        self.modified
    }

    fn fetch(&mut self) -> Option<(i64, HashMap<String, String>)> {
        self.fetches += 1;
        Some((self.modified?, self.vars.clone()))
    }
}

pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}
