//! Cross-window tab transfer.
//!
//! A tab leaves its window only as a [`TabInTransit`], built by
//! `EditorWindow::release_tab`. Release detaches the tab's wiring and
//! removes it from the source collection in one step; attaching consumes
//! the transit value and rewires against the destination in one step. The
//! tab is therefore never reachable from two windows, and never sits in a
//! collection half-wired.

use quillpad_config::{TabId, WindowId};

use crate::app::window::EditorWindow;
use crate::tab::Tab;
use crate::view::{self, ViewAdjustment, ViewSnapshot};
use crate::wiring;

/// A tab between windows: removed from its source, not yet adopted.
///
/// Carries the source window's mirror-state snapshot so the destination
/// can reconcile against it. Consumed by [`attach_to`](Self::attach_to);
/// there is no other way back into a window.
#[derive(Debug)]
pub struct TabInTransit {
    tab: Tab,
    snapshot: ViewSnapshot,
    origin: WindowId,
}

/// What adoption did to the moved tab, for logging and tests.
#[derive(Debug)]
pub struct AdoptReport {
    /// Position the tab landed at in the destination strip.
    pub index: usize,
    /// View toggles that had to change to match the destination.
    pub adjustments: Vec<ViewAdjustment>,
    /// Whether search highlighting was re-run in the destination.
    pub rehighlighted: bool,
}

impl TabInTransit {
    pub(crate) fn new(tab: Tab, snapshot: ViewSnapshot, origin: WindowId) -> Self {
        Self {
            tab,
            snapshot,
            origin,
        }
    }

    /// Snapshot of the source window's mirror state for this tab.
    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    /// Window the tab was released from.
    pub fn origin(&self) -> WindowId {
        self.origin
    }

    /// Id of the tab being moved.
    pub fn tab_id(&self) -> TabId {
        self.tab.id
    }

    /// Adopt the tab into a destination window at a position (clamped to
    /// the strip).
    ///
    /// The destination's settings win for syntax highlighting; wrap,
    /// auto-indent, and line numbers are compared bit-by-bit and adjusted
    /// only where they differ. An active search term is re-highlighted in
    /// the destination. The tab becomes current there.
    pub fn attach_to(self, window: &mut EditorWindow, at: usize) -> AdoptReport {
        let mut tab = self.tab;

        let adjustments = view::reconcile(&mut tab.view, &window.toggles);
        wiring::attach(&mut tab, window.id);

        let rehighlighted = self.snapshot.search_highlighted;
        if rehighlighted {
            tab.rehighlight_search();
        }

        let index = at.min(window.tabs.len());
        window.tabs.insert_tab_at(index, tab);
        window.mirror_insert(index);
        window.sync_title();

        AdoptReport {
            index,
            adjustments,
            rehighlighted,
        }
    }
}
