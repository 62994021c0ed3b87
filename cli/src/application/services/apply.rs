//! Application service — backup, merge and rewrite of the agent properties file.
//!
//! Flow: backup → stat → read → merge → re-stat → write. A file that changed
//! between the first stat and the write aborts the apply without writing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfFs;
use crate::domain::ConfigEntry;
use crate::domain::error::ApplyError;
use crate::domain::properties;

/// Suffix of the one-time backup written next to the properties file.
pub const BACKUP_SUFFIX: &str = ".bkp";

/// What happened to the backup on this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    /// A backup was written to this path.
    Created(PathBuf),
    /// A backup from an earlier run already exists and was left alone.
    AlreadyPresent,
    /// Nothing to back up: the properties file does not exist yet.
    NoSource,
    /// The backup could not be taken; the apply went ahead without it.
    Failed(String),
}

/// Outcome of a successful apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub path: PathBuf,
    /// `true` when the file did not exist before this run.
    pub fresh: bool,
    pub backup: BackupStatus,
    pub entries: usize,
    pub bytes_written: usize,
}

/// `<path>.bkp`, keeping the full original file name.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` to its backup location unless a backup already exists.
///
/// Never fails: problems are reported through [`BackupStatus::Failed`].
pub fn backup(fs: &impl ConfFs, path: &Path) -> BackupStatus {
    let target = backup_path(path);
    let status = match (fs.stat(&target), fs.stat(path)) {
        (Ok(Some(_)), _) => BackupStatus::AlreadyPresent,
        (Ok(None), Ok(None)) => BackupStatus::NoSource,
        (Ok(None), Ok(Some(_))) => match fs.copy(path, &target) {
            Ok(()) => BackupStatus::Created(target),
            Err(e) => BackupStatus::Failed(format!("{e:#}")),
        },
        (Err(e), _) | (_, Err(e)) => BackupStatus::Failed(format!("{e:#}")),
    };
    if let BackupStatus::Failed(reason) = &status {
        tracing::warn!(path = %path.display(), %reason, "failed to take backup");
    }
    status
}

/// Merge `entries` into the properties file at `path` and write it back.
///
/// # Errors
///
/// Returns an error if the file cannot be stat'ed, read or written, if its
/// content is not UTF-8, or [`ApplyError::FileChanged`] if it was modified
/// while the merge was running. Nothing is written on error.
pub fn apply(
    fs: &impl ConfFs,
    path: &Path,
    entries: &[ConfigEntry],
    index: usize,
) -> Result<ApplyReport> {
    let backup = backup(fs, path);

    let before = fs
        .stat(path)
        .with_context(|| format!("failed to get file info for {}", path.display()))?;
    let fresh = before.is_none();
    if fresh {
        tracing::info!(path = %path.display(), "no existing config, writing a fresh one");
    }

    let current = if fresh {
        Vec::new()
    } else {
        fs.read(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let updated = properties::merge(&current, entries, index)
        .with_context(|| format!("error while updating configuration {}", path.display()))?;

    let after = fs
        .stat(path)
        .with_context(|| format!("failed to get file info while writing {}", path.display()))?;
    if after != before {
        return Err(ApplyError::FileChanged {
            path: path.to_path_buf(),
        }
        .into());
    }

    fs.write_atomic(path, &updated)
        .with_context(|| format!("error while writing updated configuration {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = updated.len(), "configuration written");
    Ok(ApplyReport {
        path: path.to_path_buf(),
        fresh,
        backup,
        entries: entries.len(),
        bytes_written: updated.len(),
    })
}

/// Merge without touching disk; a missing file merges as empty.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not UTF-8.
pub fn preview(
    fs: &impl ConfFs,
    path: &Path,
    entries: &[ConfigEntry],
    index: usize,
) -> Result<Vec<u8>> {
    let current = match fs
        .stat(path)
        .with_context(|| format!("failed to get file info for {}", path.display()))?
    {
        Some(_) => fs
            .read(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => Vec::new(),
    };
    Ok(properties::merge(&current, entries, index)?)
}
