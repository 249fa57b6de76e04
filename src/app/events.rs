//! Outbound event payloads.
//!
//! [`ReportEvents`](super::report_events::ReportEvents) builds these and
//! hands them to the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide how they hit the wire; both types serialise as
//! JSON objects with field order preserved.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

// ───────────────────────────────────────────────────────────────
// Event body
// ───────────────────────────────────────────────────────────────

/// One field value in an outbound event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Number(f64),
    UInt(u32),
    Bool(bool),
    Object(EventBody),
}

/// Ordered key → value map.  Inserting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBody {
    fields: Vec<(String, FieldValue)>,
}

impl EventBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_owned(), value)),
        }
    }

    pub fn add_str(&mut self, name: &str, value: &str) {
        self.insert(name, FieldValue::Str(value.to_owned()));
    }

    pub fn add_number(&mut self, name: &str, value: f64) {
        self.insert(name, FieldValue::Number(value));
    }

    pub fn add_uint(&mut self, name: &str, value: u32) {
        self.insert(name, FieldValue::UInt(value));
    }

    pub fn add_bool(&mut self, name: &str, value: bool) {
        self.insert(name, FieldValue::Bool(value));
    }

    pub fn add_object(&mut self, name: &str, body: EventBody) {
        self.insert(name, FieldValue::Object(body));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_object(&self, name: &str) -> Option<&EventBody> {
        match self.get(name) {
            Some(FieldValue::Object(o)) => Some(o),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for EventBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ───────────────────────────────────────────────────────────────
// Schema (template registration)
// ───────────────────────────────────────────────────────────────

/// Wire type hint for a schema field.  Numeric widths are a packing
/// choice for the sink; the engine itself always works in `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    String,
    Float16,
    Float32,
    UInt16,
    UInt32,
    Bool,
}

/// Ordered field list registered once per stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, WireType)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, wire: WireType) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, slot)) => *slot = wire,
            None => self.fields.push((name.to_owned(), wire)),
        }
    }

    pub fn get(&self, name: &str) -> Option<WireType> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, WireType)> {
        self.fields.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, w) in &self.fields {
            map.serialize_entry(k, w)?;
        }
        map.end()
    }
}
