//! Configuration and session memory for the quillpad editor core.
//!
//! This crate owns everything that persists between runs:
//!
//! - [`Config`]: per-window view defaults, default encoding, autosave
//!   cadence, session-memory opt-in flags (`config.yaml`)
//! - [`SessionMemory`]: files and cursor positions remembered across runs,
//!   with fixed caps (`session.yaml`)
//! - shared identifier aliases ([`TabId`], [`WindowId`])
//!
//! The editor core never touches these files directly; it reads and writes
//! through the types here so the caps and formats stay in one place.

pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use session::{FileCursor, MAX_REMEMBERED_FILES, MAX_SAVED_CURSORS, SessionMemory};
pub use types::{TabId, WindowId};
