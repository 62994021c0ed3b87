//! Shared test helpers: fake ports and configuration builders.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Result;
use collector_bootstrap::application::ports::{ConfFs, ConfigStore, FileStamp, HostIdentity};
use collector_bootstrap::domain::{CoalesceFormat, CollectorConf, ConfigEntry};
use collector_bootstrap::infra::fs::LocalFs;
use serde_json::Value;

// ── Entry builders ───────────────────────────────────────────────────────────

pub fn csv(key: &str, value: Value) -> ConfigEntry {
    ConfigEntry::new(key, value)
}

pub fn with_format(mut entry: ConfigEntry, format: CoalesceFormat) -> ConfigEntry {
    entry.coalesce_format = format;
    entry
}

pub fn retaining(mut entry: ConfigEntry) -> ConfigEntry {
    entry.dont_override = true;
    entry
}

// ── Host identity ────────────────────────────────────────────────────────────

/// Host with a fixed name.
pub struct FixedHost(pub &'static str);

impl HostIdentity for FixedHost {
    fn hostname(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Host whose name cannot be read.
pub struct NoHost;

impl HostIdentity for NoHost {
    fn hostname(&self) -> Result<String> {
        anyhow::bail!("hostname unavailable")
    }
}

// ── Configuration store ──────────────────────────────────────────────────────

/// In-memory configuration store.
pub struct MemoryStore(pub CollectorConf);

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<CollectorConf> {
        Ok(self.0.clone())
    }

    fn path(&self) -> PathBuf {
        PathBuf::from("memory.yaml")
    }
}

// ── Filesystem fakes ─────────────────────────────────────────────────────────

/// Real filesystem that appends `suffix` to the file right after it is read,
/// simulating another writer racing the merge.
pub struct RacingFs {
    pub suffix: &'static str,
}

impl ConfFs for RacingFs {
    fn stat(&self, path: &Path) -> Result<Option<FileStamp>> {
        LocalFs.stat(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let content = LocalFs.read(path)?;
        let mut mutated = content.clone();
        mutated.extend_from_slice(self.suffix.as_bytes());
        std::fs::write(path, &mutated)?;
        Ok(content)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        LocalFs.copy(from, to)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        LocalFs.write_atomic(path, content)
    }
}

/// Real filesystem that rewrites the file with `replacement` right after it is
/// read and moves its modification time, leaving the size unchanged.
pub struct TouchingFs {
    pub replacement: &'static str,
}

impl ConfFs for TouchingFs {
    fn stat(&self, path: &Path) -> Result<Option<FileStamp>> {
        LocalFs.stat(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let content = LocalFs.read(path)?;
        assert_eq!(
            content.len(),
            self.replacement.len(),
            "replacement must keep the file size"
        );
        std::fs::write(path, self.replacement)?;
        let file = std::fs::OpenOptions::new().write(true).open(path)?;
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000))?;
        Ok(content)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        LocalFs.copy(from, to)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        LocalFs.write_atomic(path, content)
    }
}

/// Real filesystem that creates the file between the first and second stat.
pub struct AppearingFs {
    pub content: &'static str,
    pub stats: RefCell<usize>,
}

impl AppearingFs {
    pub fn new(content: &'static str) -> Self {
        Self {
            content,
            stats: RefCell::new(0),
        }
    }
}

impl ConfFs for AppearingFs {
    fn stat(&self, path: &Path) -> Result<Option<FileStamp>> {
        let stamp = LocalFs.stat(path)?;
        let mut stats = self.stats.borrow_mut();
        *stats += 1;
        // backup checks twice, apply checks once before the merge
        if *stats == 3 {
            std::fs::write(path, self.content)?;
        }
        Ok(stamp)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        LocalFs.read(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        LocalFs.copy(from, to)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        LocalFs.write_atomic(path, content)
    }
}

/// Real filesystem whose copy always fails.
pub struct NoCopyFs;

impl ConfFs for NoCopyFs {
    fn stat(&self, path: &Path) -> Result<Option<FileStamp>> {
        LocalFs.stat(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        LocalFs.read(path)
    }

    fn copy(&self, _: &Path, _: &Path) -> Result<()> {
        anyhow::bail!("read-only directory")
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        LocalFs.write_atomic(path, content)
    }
}
