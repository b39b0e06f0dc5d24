//! The shared value model for Lua literal conversion.
//!
//! [`Value`] mirrors JSON types but keeps object entries as ordered pairs
//! (insertion order is part of the contract, never sorted) and adds
//! [`Value::Property`] for table entries whose key is not a bare identifier,
//! so serialization can reproduce the original `[key] = value` syntax.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as Json;

/// A Lua-literal document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `nil` literal.
    Nil,
    Boolean(bool),
    Number(f64),
    Text(String),
    /// Array-like table, in element order.
    Sequence(Vec<Value>),
    /// Object-like table: key-value pairs in insertion order, keys unique.
    Mapping(Vec<(String, Value)>),
    /// A table entry whose key needs `[key] = value` bracket syntax.
    /// Produced by deserialization and expected to appear as an element
    /// inside a `Sequence`.
    Property { key: PropertyKey, value: Box<Value> },
}

/// A bracket key: text or number, never a nested container.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Text(String),
    Number(f64),
}

impl Value {
    /// `true` for the `Nil` leaf.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// `true` for `Sequence` and `Mapping`.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Build a value from parsed JSON.
    ///
    /// Objects become `Mapping` (field order preserved — relies on
    /// serde_json's `preserve_order` feature), arrays become `Sequence`,
    /// `null` becomes `Nil`. Never produces `Property`.
    pub fn from_json(json: &Json) -> Value {
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Boolean(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            Json::String(s) => Value::Text(s.clone()),
            Json::Array(items) => Value::Sequence(items.iter().map(Value::from_json).collect()),
            Json::Object(map) => Value::Mapping(
                map.iter()
                    .map(|(key, val)| (key.clone(), Value::from_json(val)))
                    .collect(),
            ),
        }
    }
}

/// Serializes onward as JSON: `Nil` → `null`, `Mapping` → object (order
/// preserved), `Property` → a `{"key": …, "value": …}` object.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::Text(text) => serializer.serialize_str(text),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, val) in pairs {
                    map.serialize_entry(key, val)?;
                }
                map.end()
            }
            Value::Property { key, value } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("key", key)?;
                map.serialize_entry("value", value.as_ref())?;
                map.end()
            }
        }
    }
}

impl Serialize for PropertyKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PropertyKey::Text(text) => serializer.serialize_str(text),
            PropertyKey::Number(n) => serialize_number(*n, serializer),
        }
    }
}

fn serialize_number<S>(n: f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match as_integer(n) {
        Some(i) => serializer.serialize_i64(i),
        None => serializer.serialize_f64(n),
    }
}

/// Whole finite numbers take integer form; `-0` folds to `0`.
pub(crate) fn as_integer(n: f64) -> Option<i64> {
    if !n.is_finite() {
        return None;
    }
    if n == 0.0 {
        return Some(0);
    }
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Natural decimal text for a Lua number.
pub(crate) fn number_text(n: f64) -> String {
    match as_integer(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}
