//! Resolving one configuration entry to the string written after `key=`.

use serde_json::Value;

use crate::domain::coalesce::coalesce;
use crate::domain::config::ConfigEntry;
use crate::domain::value::{ConfValue, scalar_string};

/// Build the value for `entry` at collector `index`, given the raw value
/// currently in the file (`""` when the key is new).
///
/// Discrete entries pick element `index` of `values`, falling back to
/// `values_list`; an index covered by neither yields `""`.
#[must_use]
pub fn build(existing: &str, entry: &ConfigEntry, index: usize) -> String {
    if entry.discrete {
        if let Some(candidate) = entry.values.get(index) {
            return emit(existing, candidate.clone(), entry);
        }
        if let Some(items) = entry.values_list.get(index) {
            return coalesce(
                existing,
                ConfValue::List(items.clone()),
                entry.coalesce_format,
                entry.dont_override,
            );
        }
        return String::new();
    }

    if entry.values.is_empty() {
        emit(existing, entry.value.clone(), entry)
    } else {
        let items = entry.values.iter().cloned().map(Value::from).collect();
        coalesce(existing, ConfValue::List(items), entry.coalesce_format, entry.dont_override)
    }
}

fn emit(existing: &str, value: ConfValue, entry: &ConfigEntry) -> String {
    match value {
        ConfValue::Scalar(v) => scalar_string(&v),
        container => coalesce(existing, container, entry.coalesce_format, entry.dont_override),
    }
}
