//! Persistence collaborator: the filesystem as the editor core sees it.
//!
//! The close and autosave paths never touch `std::fs` directly; they go
//! through [`FileStore`] so the headless test suites can substitute an
//! in-memory store and script save failures.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::encoding;

/// On-disk state of a file at the moment it was last loaded or saved.
///
/// Compared against the live filesystem to detect files that vanished or
/// were modified behind the editor's back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskRecord {
    /// Modification timestamp.
    pub modified: SystemTime,
    /// File size in bytes.
    pub size: u64,
}

/// Everything the core needs from the filesystem.
pub trait FileStore {
    /// Write `text` to `path` in `encoding`, returning the resulting disk
    /// state on success.
    fn save(&mut self, path: &Path, text: &str, encoding: &str) -> Result<DiskRecord>;

    /// Whether `path` currently exists.
    fn exists(&self, path: &Path) -> bool;

    /// Live disk state of `path`, or `None` if it is gone or unreadable.
    fn disk_record(&self, path: &Path) -> Option<DiskRecord>;
}

/// Production store over `std::fs`.
#[derive(Debug, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn save(&mut self, path: &Path, text: &str, encoding: &str) -> Result<DiskRecord> {
        let bytes = encoding::encode(text, encoding)
            .with_context(|| format!("document cannot be represented as {encoding}"))?;
        fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
        let meta =
            fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
        let modified = meta
            .modified()
            .with_context(|| format!("no modification time for {}", path.display()))?;
        Ok(DiskRecord {
            modified,
            size: meta.len(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn disk_record(&self, path: &Path) -> Option<DiskRecord> {
        let meta = fs::metadata(path).ok()?;
        let modified = meta.modified().ok()?;
        Some(DiskRecord {
            modified,
            size: meta.len(),
        })
    }
}
