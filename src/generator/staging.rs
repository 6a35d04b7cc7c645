//! Staging directory for generated files.
//!
//! Files are rendered into a fresh run directory under `[build] staging`
//! and then moved to their final location, so a failed run never leaves a
//! half-written sitemap behind. The run directory is removed when the guard
//! is dropped, whether the run succeeded or not. The staging root itself is
//! removed only if this run created it; an existing directory and whatever
//! it already holds are left alone.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::debug;

/// Scoped staging directory, removed on drop.
#[derive(Debug)]
pub struct StagingDir {
    dir: Option<TempDir>,
    /// Missing parents created for `dir`, innermost first.
    created: Vec<PathBuf>,
}

impl StagingDir {
    /// Create a run directory inside `root`, creating `root` if needed.
    pub fn create(root: &Path) -> Result<Self> {
        let created: Vec<PathBuf> = root
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .map(Path::to_path_buf)
            .collect();

        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create staging dir {}", root.display()))?;
        let dir = tempfile::Builder::new()
            .prefix("run-")
            .tempdir_in(root)
            .with_context(|| format!("Failed to create staging dir in {}", root.display()))?;

        debug!("staging"; "created {}", dir.path().display());
        Ok(Self {
            dir: Some(dir),
            created,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.as_ref().map_or(Path::new(""), TempDir::path)
    }

    /// Write `content` to `name` inside the staging directory.
    pub fn write(&self, name: &Path, content: &[u8]) -> Result<PathBuf> {
        let staged = self.path().join(name);
        if let Some(parent) = staged.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&staged, content)
            .with_context(|| format!("Failed to write {}", staged.display()))?;
        Ok(staged)
    }

    /// Move a staged file to `dest`, replacing any existing file.
    ///
    /// Falls back to copy + remove when a rename is not possible
    /// (e.g. staging and output live on different filesystems).
    pub fn publish(&self, staged: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output dir {}", parent.display()))?;
        }

        if fs::rename(staged, dest).is_err() {
            fs::copy(staged, dest)
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            let _ = fs::remove_file(staged);
        }
        Ok(())
    }

    /// Remove the run directory now, reporting failure.
    pub fn cleanup(mut self) -> Result<()> {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => debug!("staging"; "removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        remove_created(&std::mem::take(&mut self.created));
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        // Both are empty after an explicit cleanup
        drop(self.dir.take());
        remove_created(&self.created);
    }
}

/// Remove directories created for staging, stopping at the first one
/// that is not empty.
fn remove_created(dirs: &[PathBuf]) {
    for dir in dirs {
        if fs::remove_dir(dir).is_err() {
            break;
        }
        debug!("staging"; "removed {}", dir.display());
    }
}
