//! Line-oriented merge of desired entries into a `key=value` properties file.
//!
//! Pure function of its inputs: no filesystem access. Untouched lines keep
//! their content and relative order.

use indexmap::IndexMap;

use crate::domain::builder::build;
use crate::domain::config::ConfigEntry;
use crate::domain::error::ApplyError;

/// Merge `entries` into the properties document `existing`.
///
/// The first line whose key (text before the first `=`) matches an entry is
/// rewritten as `key=<built value>`; later duplicates pass through unchanged.
/// Entries whose key never appears are appended in configuration order. The
/// result always ends with a single `\n`.
///
/// # Errors
///
/// Returns [`ApplyError::NotUtf8`] when `existing` is not valid UTF-8.
pub fn merge(existing: &[u8], entries: &[ConfigEntry], index: usize) -> Result<Vec<u8>, ApplyError> {
    let text = std::str::from_utf8(existing).map_err(|e| ApplyError::NotUtf8 {
        offset: e.valid_up_to(),
    })?;

    let mut pending: IndexMap<&str, (&ConfigEntry, bool)> =
        entries.iter().map(|e| (e.key.as_str(), (e, false))).collect();

    let mut lines: Vec<String> = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let Some((key, value)) = line.split_once('=') else {
            if is_comment_or_blank(line) {
                tracing::trace!(line = number + 1, "passing through non-property line");
            } else {
                tracing::warn!(line = number + 1, content = line, "cannot parse config line");
            }
            lines.push(line.to_string());
            continue;
        };

        match pending.get_mut(key) {
            Some((entry, visited)) if !*visited => {
                *visited = true;
                let built = build(value, *entry, index);
                tracing::debug!(key, "replacing existing property");
                lines.push(format!("{key}={built}"));
            }
            _ => lines.push(line.to_string()),
        }
    }

    for (key, (entry, visited)) in pending {
        if !visited {
            tracing::debug!(key, "appending new property");
            lines.push(format!("{key}={}", build("", entry, index)));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out.into_bytes())
}

fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!')
}

// ── Unit tests ───────────────────────────────────────────────────────────────
