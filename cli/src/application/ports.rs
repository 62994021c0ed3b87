//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;

use crate::domain::CollectorConf;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Size and modification time of a file, compared to detect concurrent writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Filesystem operations needed to rewrite a properties file safely.
pub trait ConfFs {
    /// Stat `path`, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the file being absent.
    fn stat(&self, path: &Path) -> Result<Option<FileStamp>>;
    /// Read the whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    /// Copy `from` to `to`, replacing `to`.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;
    /// Replace the content of `path` in a single rename.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Source of the collector configuration.
pub trait ConfigStore {
    /// Load the configuration, returning the default when none exists.
    fn load(&self) -> Result<CollectorConf>;
    /// Location the configuration is loaded from.
    fn path(&self) -> PathBuf;
}

// ── Host Identity Port ────────────────────────────────────────────────────────

/// Abstracts host identity so index resolution can be tested without a pod.
pub trait HostIdentity {
    /// The host name of this machine.
    fn hostname(&self) -> Result<String>;
}
