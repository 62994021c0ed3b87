//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::CollectorConf;

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "collector-conf.yaml";

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV: &str = "COLLECTOR_CONF";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store reading `path`, or the `COLLECTOR_CONF` / default location when `None`.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<CollectorConf> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(CollectorConf::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(CollectorConf::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(val);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}
