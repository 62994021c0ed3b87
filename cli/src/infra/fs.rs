//! `ConfFs` over `std::fs`.

#[cfg(unix)]
use std::fs::Metadata;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::application::ports::{ConfFs, FileStamp};

/// Production filesystem implementation of `ConfFs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ConfFs for LocalFs {
    fn stat(&self, path: &Path) -> Result<Option<FileStamp>> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(Some(FileStamp {
                len: meta.len(),
                modified: meta.modified().ok(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("stat {}", path.display())),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).with_context(|| format!("reading file {}", path.display()))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::copy(from, to)
            .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
        Ok(())
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        // Symlinked configs are updated at their target, not replaced.
        let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;

        // Atomic write via temp file in the same directory, then rename.
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        temp.write_all(content)
            .with_context(|| format!("writing temp file {}", temp.path().display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("syncing temp file {}", temp.path().display()))?;

        if let Ok(meta) = std::fs::metadata(&target) {
            temp.as_file()
                .set_permissions(meta.permissions())
                .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
            #[cfg(unix)]
            keep_owner(temp.path(), &meta);
        }

        temp.persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("finalizing {}", target.display()))?;
        Ok(())
    }
}

/// Give the replacement file the owner of the file it replaces. Only root can
/// hand a file to another user; otherwise the new file keeps the caller's owner.
#[cfg(unix)]
fn keep_owner(temp: &Path, original: &Metadata) {
    use std::os::unix::fs::{MetadataExt, chown};

    if let Err(e) = chown(temp, Some(original.uid()), Some(original.gid())) {
        tracing::warn!(
            uid = original.uid(),
            gid = original.gid(),
            error = %e,
            "cannot keep owner of configuration file"
        );
    }
}
