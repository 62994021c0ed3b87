//! Configuration value shapes.
//!
//! YAML and JSON values land here before they are rendered into a property.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A desired configuration value, classified by shape.
///
/// Deserialization tries `List`, then `Map`, and falls back to `Scalar`, so a
/// `Scalar` produced by serde never holds an array or object. Use
/// [`ConfValue::from`] to classify an arbitrary [`Value`] the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfValue {
    List(Vec<Value>),
    Map(Map<String, Value>),
    Scalar(Value),
}

impl Default for ConfValue {
    fn default() -> Self {
        Self::Scalar(Value::Null)
    }
}

impl From<Value> for ConfValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(map) => Self::Map(map),
            scalar => Self::Scalar(scalar),
        }
    }
}

impl From<ConfValue> for Value {
    fn from(value: ConfValue) -> Self {
        match value {
            ConfValue::List(items) => Value::Array(items),
            ConfValue::Map(map) => Value::Object(map),
            ConfValue::Scalar(scalar) => scalar,
        }
    }
}

/// Render a value the way it appears on the right-hand side of `key=value`.
///
/// Strings are emitted raw, numbers and booleans in their canonical form, and
/// `null` as the empty string. Nested containers fall back to compact JSON.
#[must_use]
pub fn scalar_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
