//! Configuration updates from the remote key/value environment.
//!
//! Thresholds are pushed to the device as string variables named
//! `<measurement>_<normal|warning>_<low|high>`.  An [`EnvironmentUpdate`]
//! wraps one snapshot of those variables and collects what a reload pass
//! did with them: which bounds changed and which values were rejected.
//! The collected notifications become the payload of the notify event.

pub mod poll;

use std::collections::{BTreeMap, HashMap};

use crate::app::events::EventBody;

/// Read-only key/value lookup.  An empty value is treated as absent.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<&str>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }
}

/// A bound that changed (or would change, in a dry run).
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub key: String,
    pub old: Option<f64>,
    pub new: Option<f64>,
}

/// A value that was rejected; the bound was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub key: String,
    pub message: &'static str,
    pub value: String,
}

/// One environment snapshot plus the notifications raised while applying it.
pub struct EnvironmentUpdate<S> {
    source: S,
    changes: Vec<Change>,
    errors: Vec<ConfigIssue>,
}

impl<S: ConfigSource> EnvironmentUpdate<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            changes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Raw value for `key`; `None` when missing or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.source.get(key).filter(|v| !v.is_empty())
    }

    pub fn notify_changed(&mut self, key: &str, old: Option<f64>, new: Option<f64>) {
        self.changes.push(Change {
            key: key.to_owned(),
            old,
            new,
        });
    }

    pub fn notify_error(&mut self, key: &str, message: &'static str, value: &str) {
        self.errors.push(ConfigIssue {
            key: key.to_owned(),
            message,
            value: value.to_owned(),
        });
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn errors(&self) -> &[ConfigIssue] {
        &self.errors
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_content(&self) -> bool {
        self.has_changes() || self.has_errors()
    }

    /// Drop collected notifications, keeping the snapshot (used between a
    /// dry run and the committing pass).
    pub fn reset_notifications(&mut self) {
        self.changes.clear();
        self.errors.clear();
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Notify payload: `updates` and `errors` objects, each present only
    /// when non-empty.
    pub fn to_body(&self) -> EventBody {
        let mut body = EventBody::new();
        if self.has_changes() {
            let mut updates = EventBody::new();
            for c in &self.changes {
                let mut item = EventBody::new();
                if let Some(old) = c.old {
                    item.add_number("old_value", old);
                }
                if let Some(new) = c.new {
                    item.add_number("new_value", new);
                }
                updates.add_object(&c.key, item);
            }
            body.add_object("updates", updates);
        }
        if self.has_errors() {
            let mut errors = EventBody::new();
            for e in &self.errors {
                let mut item = EventBody::new();
                item.add_str("error", e.message);
                item.add_str("value", &e.value);
                errors.add_object(&e.key, item);
            }
            body.add_object("errors", errors);
        }
        body
    }
}
