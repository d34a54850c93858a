//! Dialog collaborator: the blocking prompts the close protocol needs.
//!
//! The core never draws UI. Everything it has to ask the user goes through
//! [`DialogService`], which a GUI shell implements with real modal dialogs
//! and the test suites implement with scripted answers. The process-wide
//! "one blocking dialog at a time" rule is enforced by the application
//! registry, not here.

use std::path::PathBuf;

use quillpad_config::WindowId;

/// The user's answer to the per-tab save prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    /// Write the document, then close the tab.
    Save,
    /// Close the tab without writing.
    Discard,
    /// Stop the whole close operation.
    Cancel,
    /// Discard this tab and every further tab in the batch without asking.
    NoToAll,
}

/// Everything a shell needs to render the save prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePromptRequest {
    /// Window the prompt belongs to.
    pub window: WindowId,
    /// Display title of the tab being asked about.
    pub title: String,
    /// Backing file, if the document has one.
    pub path: Option<PathBuf>,
    /// Whether the "No to all" choice is offered.
    pub allow_no_to_all: bool,
}

/// Blocking dialogs the core delegates to the shell.
pub trait DialogService {
    /// Present the four-way save prompt and return the user's choice.
    fn ask_save(&mut self, request: &SavePromptRequest) -> SaveChoice;

    /// Ask for a save location for an untitled document; `None` means the
    /// user backed out.
    fn pick_save_path(&mut self, window: WindowId, title: &str) -> Option<PathBuf>;

    /// Show a transient, non-blocking warning.
    fn warn(&mut self, window: WindowId, message: &str);
}
