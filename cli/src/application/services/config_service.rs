//! Configuration use-cases: load, index resolution, masking.

use anyhow::{Context, Result};

use crate::application::ports::{ConfigStore, HostIdentity};
use crate::domain::CollectorConf;
use crate::domain::index::ordinal_from_hostname;
use crate::domain::mask::mask_json;

/// Load and validate configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn load_config(store: &impl ConfigStore) -> Result<CollectorConf> {
    let mut conf = store.load()?;
    conf.validate()
        .with_context(|| format!("invalid configuration in {}", store.path().display()))?;
    Ok(conf)
}

/// Resolve the collector index: explicit override first, then the
/// configuration's `debugIndex`, then the hostname ordinal.
///
/// # Errors
///
/// Returns an error if the hostname is needed but unavailable or carries no
/// ordinal suffix.
pub fn resolve_index(
    override_index: Option<usize>,
    conf: &CollectorConf,
    host: &impl HostIdentity,
) -> Result<usize> {
    if let Some(index) = override_index.or(conf.debug_index) {
        tracing::debug!(index, "using debug collector index");
        return Ok(index);
    }
    let hostname = host.hostname().context("cannot retrieve collector index")?;
    let index = ordinal_from_hostname(&hostname).context("cannot retrieve collector index")?;
    tracing::debug!(index, %hostname, "collector index from hostname");
    Ok(index)
}

/// The configuration as JSON with sensitive values masked, for logs and display.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn masked_config(conf: &CollectorConf) -> Result<serde_json::Value> {
    let raw = serde_json::to_value(conf).context("cannot serialize configuration")?;
    Ok(mask_json(&raw, &[]))
}
