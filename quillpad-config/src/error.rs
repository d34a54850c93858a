//! Typed error types for quillpad-config.
//!
//! This module provides structured error types so callers at the crate boundary
//! can match on specific error variants instead of relying on opaque `anyhow`
//! strings.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for configuration and session persistence.
///
/// Covers the failure categories that callers may want to distinguish:
/// - file I/O (read, write, directory creation)
/// - YAML parse / serialize failures
/// - missing platform configuration directory
#[derive(Debug, Error)]
pub enum ConfigError {
    // -----------------------------------------------------------------------
    // File I/O
    // -----------------------------------------------------------------------
    /// A configuration or session file could not be read or written.
    #[error("config I/O failed for '{path}': {source}")]
    Io {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------
    /// An on-disk file exists but could not be parsed as YAML.
    #[error("config parse failed for '{path}': {source}")]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// An in-memory value could not be serialized to YAML.
    #[error("config serialize failed: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    // -----------------------------------------------------------------------
    // Environment
    // -----------------------------------------------------------------------
    /// No platform configuration directory could be determined.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}
