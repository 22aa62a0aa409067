//! Core types for the event log.
//!
//! Event payloads arrive from an external machine-control process with an
//! arbitrary schema, so they are kept as a string-keyed map of a tagged
//! value type rather than a fixed struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Payload Values
// ============================================================================

/// Structured data attached to an event, keyed by argument name.
pub type Payload = BTreeMap<String, EventValue>;

/// A single payload value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<EventValue>),
    Map(Payload),
}

impl EventValue {
    /// Get the value as text if it is a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert the value to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EventValue::Integer(n) => Some(*n as f64),
            EventValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, EventValue::Null)
    }
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventValue::Null => f.write_str("null"),
            EventValue::Bool(b) => write!(f, "{}", b),
            EventValue::Integer(n) => write!(f, "{}", n),
            EventValue::Float(n) => {
                // Keep a decimal point so floats stay distinguishable from ints
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            EventValue::Text(s) => write!(f, "{:?}", s),
            EventValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            EventValue::Map(map) => write!(f, "{}", PayloadDisplay(map)),
        }
    }
}

/// Renders a payload as `{key: value, ...}` for the data column.
pub struct PayloadDisplay<'a>(pub &'a Payload);

impl fmt::Display for PayloadDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl From<serde_json::Value> for EventValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => EventValue::Null,
            Value::Bool(b) => EventValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => EventValue::Integer(i),
                None => EventValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => EventValue::Text(s),
            Value::Array(items) => EventValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(obj) => {
                EventValue::Map(obj.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for EventValue {
    fn from(b: bool) -> Self {
        EventValue::Bool(b)
    }
}

impl From<i64> for EventValue {
    fn from(n: i64) -> Self {
        EventValue::Integer(n)
    }
}

impl From<f64> for EventValue {
    fn from(n: f64) -> Self {
        EventValue::Float(n)
    }
}

impl From<&str> for EventValue {
    fn from(s: &str) -> Self {
        EventValue::Text(s.to_string())
    }
}

impl From<String> for EventValue {
    fn from(s: String) -> Self {
        EventValue::Text(s)
    }
}

/// Convert a JSON value into a payload.
///
/// Objects map key by key. Anything else is kept under a single `value` key
/// so no incoming data is dropped.
pub fn payload_from_json(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(obj) => obj.into_iter().map(|(k, v)| (k, v.into())).collect(),
        serde_json::Value::Null => Payload::new(),
        other => Payload::from([("value".to_string(), other.into())]),
    }
}

// ============================================================================
// Event Records
// ============================================================================

/// One event as stored in the log. Never mutated after append.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Insertion index, strictly increasing, never reused
    pub sequence: u64,
    /// Event identifier (not unique)
    pub name: String,
    /// Arguments the event was posted with, origin key removed
    pub payload: Payload,
}

impl EventRecord {
    /// Render the payload for the data column
    pub fn data_text(&self) -> String {
        PayloadDisplay(&self.payload).to_string()
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Display order of the event log
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Placeholder entry of the order selector. Never selectable.
    Unsorted,
    /// Newest first
    #[default]
    ReceivedDesc,
    /// Oldest first
    ReceivedAsc,
    /// Name A-Z, equal names oldest first
    NameAsc,
    /// Name Z-A, equal names oldest first
    NameDesc,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Unsorted => "Sort",
            SortOrder::ReceivedDesc => "Received ↑",
            SortOrder::ReceivedAsc => "Received ↓",
            SortOrder::NameAsc => "Name A→Z",
            SortOrder::NameDesc => "Name Z→A",
        }
    }

    /// Every entry of the order selector, placeholder included
    pub fn all() -> &'static [SortOrder] {
        &[
            SortOrder::Unsorted,
            SortOrder::ReceivedDesc,
            SortOrder::ReceivedAsc,
            SortOrder::NameAsc,
            SortOrder::NameDesc,
        ]
    }

    /// Whether the operator can pick this order
    pub fn is_selectable(&self) -> bool {
        !matches!(self, SortOrder::Unsorted)
    }
}
