//! Editor configuration management.
//!
//! This module provides configuration loading, saving, and default values
//! for the editor shell: per-window view defaults, the default text
//! encoding, autosave cadence, and the session-memory opt-in flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// User configuration, persisted as `config.yaml` in the platform
/// configuration directory.
///
/// Every field carries a serde default so configs written by older versions
/// keep loading after new fields are added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Wrap long lines at the window edge in newly created windows.
    #[serde(default = "defaults::word_wrap")]
    pub word_wrap: bool,

    /// Repeat the previous line's leading whitespace on Enter.
    #[serde(default = "defaults::auto_indent")]
    pub auto_indent: bool,

    /// Show the line-number margin in newly created windows.
    #[serde(default)]
    pub line_numbers: bool,

    /// Enable syntax highlighting in newly created windows.
    #[serde(default = "defaults::syntax_highlight")]
    pub syntax_highlight: bool,

    /// Show the status bar in newly created windows.
    #[serde(default = "defaults::show_status_bar")]
    pub show_status_bar: bool,

    /// Show the cursor position readout in the status bar.
    #[serde(default)]
    pub show_cursor_position: bool,

    /// Open new windows with the side pane visible.
    #[serde(default)]
    pub side_pane: bool,

    /// Encoding assigned to new untitled documents.
    #[serde(default = "defaults::default_encoding")]
    pub default_encoding: String,

    /// Record files closed at shutdown so the next session can reopen them.
    #[serde(default = "defaults::remember_last_files")]
    pub remember_last_files: bool,

    /// Restore the cursor position when a remembered file is reopened.
    #[serde(default = "defaults::remember_cursor_positions")]
    pub remember_cursor_positions: bool,

    /// Seconds between automatic background saves; `0` disables autosave.
    #[serde(default)]
    pub autosave_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_wrap: defaults::word_wrap(),
            auto_indent: defaults::auto_indent(),
            line_numbers: false,
            syntax_highlight: defaults::syntax_highlight(),
            show_status_bar: defaults::show_status_bar(),
            show_cursor_position: false,
            side_pane: false,
            default_encoding: defaults::default_encoding(),
            remember_last_files: defaults::remember_last_files(),
            remember_cursor_positions: defaults::remember_cursor_positions(),
            autosave_interval_secs: 0,
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration directory for quillpad
    /// (e.g. `~/.config/quillpad` on Linux).
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("quillpad"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Path of the configuration file inside [`Config::config_dir`].
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load the configuration from the default location.
    ///
    /// A missing or empty file yields the defaults; a present but malformed
    /// file is an error so user edits are never silently discarded.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path()?)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_path()?)
    }

    /// Save the configuration to a specific file, creating parent
    /// directories as needed.
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
        log::info!("Saved config to {:?}", path);
        Ok(())
    }
}

mod defaults {
    pub fn word_wrap() -> bool {
        true
    }
    pub fn auto_indent() -> bool {
        true
    }
    pub fn syntax_highlight() -> bool {
        true
    }
    pub fn show_status_bar() -> bool {
        true
    }
    pub fn default_encoding() -> String {
        "UTF-8".to_string()
    }
    pub fn remember_last_files() -> bool {
        true
    }
    pub fn remember_cursor_positions() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert!(config.word_wrap);
        assert!(config.auto_indent);
        assert!(!config.line_numbers);
        assert!(config.syntax_highlight);
        assert!(config.show_status_bar);
        assert!(!config.show_cursor_position);
        assert!(!config.side_pane);
        assert_eq!(config.default_encoding, "UTF-8");
        assert!(config.remember_last_files);
        assert!(config.remember_cursor_positions);
        assert_eq!(config.autosave_interval_secs, 0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.line_numbers = true;
        config.default_encoding = "UTF-16LE".to_string();
        config.autosave_interval_secs = 30;
        config.save_to(path.clone()).expect("save");

        let loaded = Config::load_from(path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let loaded = Config::load_from(dir.path().join("absent.yaml")).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "  \n").expect("write");
        let loaded = Config::load_from(path).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "word_wrap: [not a bool").expect("write");
        match Config::load_from(path) {
            Err(ConfigError::Parse { .. }) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "line_numbers: true\n").expect("write");
        let loaded = Config::load_from(path).expect("load");
        assert!(loaded.line_numbers);
        assert!(loaded.word_wrap);
        assert_eq!(loaded.default_encoding, "UTF-8");
    }
}
