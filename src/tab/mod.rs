//! Tab management for the editor.
//!
//! This module provides:
//! - `Tab` - one open document: text, metadata, and runtime state
//! - `TabCollection` - ordered tabs owned by one window, with a current
//!   selection (`collection` submodule)

pub mod collection;

pub use collection::{CurrentSelection, TabCollection};

use std::path::PathBuf;
use tokio::task::JoinHandle;

use quillpad_config::TabId;

use crate::search::SearchState;
use crate::store::DiskRecord;
use crate::view::ViewToggles;
use crate::wiring::SubscriptionSet;

/// One open document and its editing/runtime state.
///
/// A `Tab` is owned by exactly one [`TabCollection`] at any instant.
/// Relocation moves the same `Tab` value to another collection; it is
/// never cloned or shared.
#[derive(Debug)]
pub struct Tab {
    /// Unique id, stable across relocation.
    pub id: TabId,
    /// Backing file; `None` for untitled documents.
    pub path: Option<PathBuf>,
    /// Document text.
    pub text: String,
    /// Unsaved changes exist.
    pub modified: bool,
    /// User-requested read-only mode.
    pub read_only: bool,
    /// Forced read-only: Latin-1 fallback content or a huge line.
    pub uneditable: bool,
    /// Encoding used on load and save.
    pub encoding: String,
    /// Disk state at the last load or save; `None` for untitled documents.
    pub disk: Option<DiskRecord>,
    /// Current cursor position as a character offset.
    pub cursor: u64,
    /// Cursor restore target, applied on the next pump tick after the
    /// content is set.
    pub saved_cursor: Option<u64>,
    /// This editor's view toggles; reconciled against the owning window
    /// when the tab changes windows.
    pub view: ViewToggles,
    /// Search term and highlight ranges.
    pub search: SearchState,
    /// Subscriptions binding this tab to its owner; `None` while the tab
    /// is in transit between windows.
    pub wiring: Option<SubscriptionSet>,
    /// Built-in help document.
    pub help: bool,
    /// Cleared while the "already open elsewhere" cue is showing.
    pub enabled: bool,
    /// At most one concurrent external process per tab.
    pub process: Option<JoinHandle<()>>,
    /// Cached word count; cleared on every text mutation.
    word_count: Option<usize>,
}

impl Tab {
    /// Create an empty untitled tab.
    pub fn new_untitled(id: TabId, view: ViewToggles, encoding: &str) -> Self {
        Self {
            id,
            path: None,
            text: String::new(),
            modified: false,
            read_only: false,
            uneditable: false,
            encoding: encoding.to_string(),
            disk: None,
            cursor: 0,
            saved_cursor: None,
            view,
            search: SearchState::default(),
            wiring: None,
            help: false,
            enabled: true,
            process: None,
            word_count: None,
        }
    }

    /// Title shown on the tab, in the window title, and in the side pane.
    pub fn display_title(&self) -> String {
        if let Some(path) = &self.path {
            return path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
        }
        if self.help {
            return "Help".to_string();
        }
        "Untitled".to_string()
    }

    /// Side-pane row text: the display title with `*` appended while the
    /// document is modified.
    pub fn mirror_text(&self) -> String {
        let mut text = self.display_title();
        if self.modified {
            text.push('*');
        }
        text
    }

    /// Tooltip text: the full path, or the display title for untitled
    /// documents.
    pub fn tooltip(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => self.display_title(),
        }
    }

    /// Replace the document text as a user edit. Callers gate editability;
    /// this always marks the document modified.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.modified = true;
        self.word_count = None;
        self.rehighlight_search();
        self.clamp_cursor();
    }

    /// Install content produced by the loader.
    pub fn apply_loaded(
        &mut self,
        text: String,
        path: PathBuf,
        encoding: String,
        uneditable: bool,
        disk: Option<DiskRecord>,
    ) {
        self.text = text;
        self.path = Some(path);
        self.encoding = encoding;
        self.uneditable = uneditable;
        self.disk = disk;
        self.modified = false;
        self.word_count = None;
        self.cursor = 0;
        self.rehighlight_search();
    }

    /// Record a successful save.
    pub fn mark_saved(&mut self, record: DiskRecord) {
        self.modified = false;
        self.disk = Some(record);
    }

    /// Recompute search highlights over the current text.
    pub fn rehighlight_search(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.search.rehighlight(&text);
        self.text = text;
    }

    /// Word count, computed on demand and cached until the next edit.
    pub fn word_count(&mut self) -> usize {
        if let Some(count) = self.word_count {
            return count;
        }
        let count = self.text.split_whitespace().count();
        self.word_count = Some(count);
        count
    }

    /// Whether this tab can silently host a file load: untitled, empty,
    /// and unmodified.
    pub fn is_blank(&self) -> bool {
        self.path.is_none() && self.text.is_empty() && !self.modified && !self.help
    }

    /// Whether an external process is currently attached to this tab.
    pub fn has_running_process(&self) -> bool {
        self.process.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Keep the cursor inside the document.
    pub fn clamp_cursor(&mut self) {
        let max = self.text.chars().count() as u64;
        if self.cursor > max {
            self.cursor = max;
        }
    }

    #[cfg(test)]
    pub(crate) fn new_stub(id: TabId) -> Self {
        Self::new_untitled(
            id,
            ViewToggles {
                word_wrap: true,
                auto_indent: true,
                line_numbers: false,
                syntax_highlight: true,
            },
            "UTF-8",
        )
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        if let Some(handle) = self.process.take() {
            log::debug!("Tab {} dropped with a running process, aborting", self.id);
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_prefers_the_file_name() {
        let mut tab = Tab::new_stub(1);
        assert_eq!(tab.display_title(), "Untitled");

        tab.path = Some(PathBuf::from("/home/user/notes.txt"));
        assert_eq!(tab.display_title(), "notes.txt");

        tab.path = None;
        tab.help = true;
        assert_eq!(tab.display_title(), "Help");
    }

    #[test]
    fn mirror_text_marks_modified_documents() {
        let mut tab = Tab::new_stub(1);
        tab.path = Some(PathBuf::from("/tmp/a.txt"));
        assert_eq!(tab.mirror_text(), "a.txt");
        tab.modified = true;
        assert_eq!(tab.mirror_text(), "a.txt*");
    }

    #[test]
    fn word_count_caches_until_the_next_edit() {
        let mut tab = Tab::new_stub(1);
        tab.set_text("one two  three");
        assert_eq!(tab.word_count(), 3);
        assert_eq!(tab.word_count(), 3);
        tab.set_text("one");
        assert_eq!(tab.word_count(), 1);
    }

    #[test]
    fn set_text_marks_modified_and_rehighlights() {
        let mut tab = Tab::new_stub(1);
        tab.search.set_term("ab", "");
        tab.set_text("ab ab");
        assert!(tab.modified);
        assert_eq!(tab.search.matches.len(), 2);
    }

    #[test]
    fn blank_detection() {
        let mut tab = Tab::new_stub(1);
        assert!(tab.is_blank());
        tab.set_text("x");
        assert!(!tab.is_blank());
    }

    #[test]
    fn cursor_clamps_to_document_end() {
        let mut tab = Tab::new_stub(1);
        tab.set_text("abc");
        tab.cursor = 99;
        tab.clamp_cursor();
        assert_eq!(tab.cursor, 3);
    }

    #[test]
    fn loaded_content_is_clean() {
        let mut tab = Tab::new_stub(1);
        tab.set_text("draft");
        tab.apply_loaded(
            "from disk".to_string(),
            PathBuf::from("/tmp/doc.txt"),
            "UTF-8".to_string(),
            false,
            None,
        );
        assert!(!tab.modified);
        assert_eq!(tab.text, "from disk");
        assert_eq!(tab.display_title(), "doc.txt");
        assert_eq!(tab.cursor, 0);
    }
}
