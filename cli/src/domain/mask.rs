//! Masking of sensitive values before configuration is logged or shown.
//!
//! The same input always masks to the same output.

use serde_json::{Map, Value};

/// Field-name fragments treated as sensitive (case-insensitive substring).
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "pass",
    "secret",
    "token",
    "key",
    "access",
    "credential",
    "auth",
];

/// Entry fields holding the value of a configuration entry.
const ENTRY_VALUE_FIELDS: &[&str] = &["value", "values", "valuesList"];

/// Mask sensitive scalars in `value`.
///
/// A field is sensitive when its name contains one of [`SENSITIVE_FIELDS`] or
/// `extra`. The structural `key` field of a configuration entry is never
/// masked; instead, when the entry's key names a sensitive setting, its
/// `value`, `values` and `valuesList` are masked.
#[must_use]
pub fn mask_json(value: &Value, extra: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(mask_object(map, extra)),
        Value::Array(items) => Value::Array(items.iter().map(|v| mask_json(v, extra)).collect()),
        other => other.clone(),
    }
}

fn mask_object(map: &Map<String, Value>, extra: &[&str]) -> Map<String, Value> {
    let sensitive_entry = map
        .get("key")
        .and_then(Value::as_str)
        .is_some_and(|k| is_sensitive(k, extra));

    map.iter()
        .map(|(field, v)| {
            let masked = if field == "key" {
                v.clone()
            } else if is_sensitive(field, extra)
                || (sensitive_entry && ENTRY_VALUE_FIELDS.contains(&field.as_str()))
            {
                mask_scalars(v)
            } else {
                mask_json(v, extra)
            };
            (field.clone(), masked)
        })
        .collect()
}

fn is_sensitive(name: &str, extra: &[&str]) -> bool {
    let name = name.to_ascii_lowercase();
    SENSITIVE_FIELDS
        .iter()
        .chain(extra)
        .any(|token| name.contains(&token.to_ascii_lowercase()))
}

fn mask_scalars(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::String(s) => Value::String(mask_str(s)),
        Value::Bool(_) | Value::Number(_) => Value::String(mask_str(&value.to_string())),
        Value::Array(items) => Value::Array(items.iter().map(mask_scalars).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), mask_scalars(v)))
                .collect(),
        ),
    }
}

/// Keep the first quarter of `s` and replace the rest with `*`.
#[must_use]
pub fn mask_str(s: &str) -> String {
    let len = s.chars().count();
    let keep = len / 4;
    s.chars()
        .take(keep)
        .chain(std::iter::repeat_n('*', len - keep))
        .collect()
}
