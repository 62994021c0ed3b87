//! Collector index derivation.
//!
//! Stateful-set pods are named `<name>-<ordinal>`; the ordinal selects which
//! element of a discrete entry applies to this host.

use crate::domain::error::IndexError;

/// Parse the ordinal suffix of a stateful-set style hostname.
///
/// # Errors
///
/// Returns [`IndexError::NoOrdinal`] when the text after the last `-` is not
/// a non-negative integer.
pub fn ordinal_from_hostname(hostname: &str) -> Result<usize, IndexError> {
    let suffix = hostname.rsplit('-').next().unwrap_or_default();
    suffix
        .parse::<usize>()
        .map_err(|_| IndexError::NoOrdinal(hostname.to_string()))
}
