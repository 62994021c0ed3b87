//! Combining a desired value with the value already present in the file.
//!
//! No I/O here; diagnostics go through `tracing`.

use indexmap::IndexSet;
use serde_json::Value;

use crate::domain::config::CoalesceFormat;
use crate::domain::value::{ConfValue, scalar_string};

/// Coalesce `new` with the raw `existing` value according to `format`.
///
/// - `Csv` / `BitwiseOr`: tokens of `new` joined by the format separator. With
///   `dont_override`, tokens of `existing` missing from `new` are appended in
///   their original order. A map cannot be rendered as a list and yields `""`.
/// - `Json`: compact JSON of `new`. With `dont_override`, keys (for maps) or
///   elements (for lists) of the parsed `existing` value that `new` lacks are
///   carried over; `new` always wins.
/// - `Unknown`: `""`.
#[must_use]
pub fn coalesce(existing: &str, new: ConfValue, format: CoalesceFormat, dont_override: bool) -> String {
    match format {
        CoalesceFormat::Csv | CoalesceFormat::BitwiseOr => {
            let sep = format.separator().unwrap_or(",");
            coalesce_delimited(existing, new, sep, dont_override)
        }
        CoalesceFormat::Json => coalesce_json(existing, new, dont_override),
        CoalesceFormat::Unknown => {
            tracing::warn!("coalesce format not set, emitting empty value");
            String::new()
        }
    }
}

fn coalesce_delimited(existing: &str, new: ConfValue, sep: &str, dont_override: bool) -> String {
    let tokens: Vec<String> = match new {
        ConfValue::Map(_) => {
            tracing::warn!(separator = sep, "map value cannot be written as a delimited list");
            return String::new();
        }
        ConfValue::List(items) => items.iter().map(scalar_string).collect(),
        ConfValue::Scalar(Value::Null) => Vec::new(),
        ConfValue::Scalar(v) => vec![scalar_string(&v)],
    };

    if !dont_override || existing.is_empty() {
        return tokens.join(sep);
    }

    let fresh: IndexSet<&str> = tokens.iter().map(String::as_str).collect();
    let retained: IndexSet<&str> = existing
        .split(sep)
        .filter(|prior| !fresh.contains(prior))
        .collect();

    tokens
        .iter()
        .map(String::as_str)
        .chain(retained)
        .collect::<Vec<_>>()
        .join(sep)
}

fn coalesce_json(existing: &str, new: ConfValue, dont_override: bool) -> String {
    let mut merged = Value::from(new);

    if dont_override && !existing.is_empty() {
        match serde_json::from_str::<Value>(existing) {
            Ok(previous) => retain_previous(&mut merged, previous, existing),
            Err(e) => tracing::warn!(
                existing,
                error = %e,
                "cannot retain old config value"
            ),
        }
    }

    serde_json::to_string(&merged).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "cannot serialize config value");
        String::new()
    })
}

fn retain_previous(merged: &mut Value, previous: Value, raw: &str) {
    match (merged, previous) {
        (Value::Object(current), Value::Object(old)) => {
            for (k, v) in old {
                current.entry(k).or_insert(v);
            }
        }
        (Value::Array(current), Value::Array(old)) => {
            let additions: Vec<Value> = old.into_iter().filter(|v| !current.contains(v)).collect();
            current.extend(additions);
        }
        (current, old) if current.is_object() || current.is_array() || old.is_object() || old.is_array() => {
            tracing::warn!(existing = raw, "type mismatch hence cannot retain old config value");
        }
        _ => {}
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
