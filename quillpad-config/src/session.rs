//! Session memory: files and cursor positions remembered across runs.
//!
//! Stored in `session.yaml` next to the configuration file. The editor core
//! only reads and writes through this type; the caps below are enforced
//! here so every caller gets the same policy.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ConfigError;

/// Most files ever recorded for reopening; once the list is full, further
/// recording within one close operation is silently skipped.
pub const MAX_REMEMBERED_FILES: usize = 50;

/// Most cursor positions ever remembered; the oldest entry is evicted to
/// make room for a new one.
pub const MAX_SAVED_CURSORS: usize = 50;

/// A remembered cursor position for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileCursor {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Character offset of the cursor when the file was last closed.
    pub position: u64,
}

/// Files and cursor positions carried from one run to the next.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionMemory {
    /// Files open when the previous session ended, oldest first.
    #[serde(default)]
    pub last_files: Vec<PathBuf>,

    /// Remembered cursor positions, oldest first.
    #[serde(default)]
    pub cursors: Vec<FileCursor>,
}

impl SessionMemory {
    /// Path of the session file inside the configuration directory.
    pub fn session_path() -> Result<PathBuf, ConfigError> {
        Ok(Config::config_dir()?.join("session.yaml"))
    }

    /// Load session memory from the default location; missing or empty
    /// files yield an empty memory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::session_path()?)
    }

    /// Load session memory from a specific file.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let memory =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        log::info!("Loaded session memory from {:?}", path);
        Ok(memory)
    }

    /// Save session memory to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::session_path()?)
    }

    /// Save session memory to a specific file, creating parent directories
    /// as needed.
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;
        fs::write(&path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!(
            "Saved session memory ({} files, {} cursors) to {:?}",
            self.last_files.len(),
            self.cursors.len(),
            path
        );
        Ok(())
    }

    /// Record a file for reopening next session.
    ///
    /// A path already present is moved to the end instead of duplicated.
    /// Returns `false` without recording once [`MAX_REMEMBERED_FILES`] is
    /// reached; callers use that to stop recording for the rest of their
    /// operation.
    pub fn remember_file(&mut self, path: &Path) -> bool {
        self.last_files.retain(|p| p != path);
        if self.last_files.len() >= MAX_REMEMBERED_FILES {
            log::debug!("Remembered-files list is full, not recording {:?}", path);
            return false;
        }
        self.last_files.push(path.to_path_buf());
        true
    }

    /// Forget all remembered files. Called at the start of a shutdown so
    /// the list reflects only the session being closed.
    pub fn clear_last_files(&mut self) {
        self.last_files.clear();
    }

    /// Whether the remembered-files list is at capacity. Callers check this
    /// before starting a batch of [`remember_file`](Self::remember_file)
    /// calls to skip recording entirely.
    pub fn files_full(&self) -> bool {
        self.last_files.len() >= MAX_REMEMBERED_FILES
    }

    /// Remember the cursor position for a file, replacing any previous
    /// entry for the same path and evicting the oldest entry once
    /// [`MAX_SAVED_CURSORS`] is reached.
    pub fn remember_cursor(&mut self, path: &Path, position: u64) {
        self.cursors.retain(|c| c.path != path);
        if self.cursors.len() >= MAX_SAVED_CURSORS {
            self.cursors.remove(0);
        }
        self.cursors.push(FileCursor {
            path: path.to_path_buf(),
            position,
        });
    }

    /// Remembered cursor position for a file, if any.
    pub fn cursor_for(&self, path: &Path) -> Option<u64> {
        self.cursors
            .iter()
            .find(|c| c.path == path)
            .map(|c| c.position)
    }
}
