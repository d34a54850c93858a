//! Per-window state.
//!
//! An `EditorWindow` owns one tab strip and keeps three things in step
//! with it on every mutation: the window title, the optional side-pane
//! mirror, and the current selection. Tabs only ever leave a window
//! through [`take_tab`](EditorWindow::take_tab), which cannot forget any
//! of the three.

use std::cell::Cell;
use std::rc::Rc;

use quillpad_config::{Config, TabId, WindowId};

use crate::relocate::TabInTransit;
use crate::side_pane::SidePaneMirror;
use crate::tab::{Tab, TabCollection};
use crate::view::{ViewSnapshot, ViewToggles};
use crate::wiring;

/// One editor window: tab strip, mirror state, and menu toggles.
#[derive(Debug)]
pub struct EditorWindow {
    pub id: WindowId,
    /// `"<document> - Quillpad"`, or `"Quillpad"` with no tabs. The
    /// document part carries a `*` while modified.
    pub title: String,
    pub tabs: TabCollection,
    /// Present only while the side pane is enabled; every interaction
    /// with it is conditional.
    pub side_pane: Option<SidePaneMirror>,
    /// Authoritative view toggles for this window's menu state.
    pub toggles: ViewToggles,
    pub show_status_bar: bool,
    pub show_cursor_position: bool,
    /// Busy indicator, shared with the autosave pause guard that clears
    /// it on every exit path.
    pub busy: Rc<Cell<bool>>,
    /// A tab drag holds the mouse grab; cleared by a deferred task so
    /// handlers still running see the pre-drag state.
    pub drag_active: bool,
}

impl EditorWindow {
    /// Create an empty window with the configuration's view settings.
    pub fn new(id: WindowId, config: &Config) -> Self {
        let mut window = Self {
            id,
            title: String::new(),
            tabs: TabCollection::new(),
            side_pane: config.side_pane.then(SidePaneMirror::new),
            toggles: ViewToggles::from_config(config),
            show_status_bar: config.show_status_bar,
            show_cursor_position: config.show_cursor_position,
            busy: Rc::new(Cell::new(false)),
            drag_active: false,
        };
        window.sync_title();
        window
    }

    /// Recompute the window title from the current tab.
    pub fn sync_title(&mut self) {
        self.title = match self.tabs.current_tab() {
            Some(tab) => {
                let mut doc = tab.display_title();
                if tab.modified {
                    doc.push('*');
                }
                format!("{doc} - Quillpad")
            }
            None => "Quillpad".to_string(),
        };
    }

    /// Append a tab, mirror it, and make it current.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push_tab(tab);
        let index = self.tabs.len() - 1;
        self.mirror_insert(index);
        self.sync_title();
    }

    /// Insert a side-pane row for the tab at `index`.
    pub fn mirror_insert(&mut self, index: usize) {
        let Some(pane) = self.side_pane.as_mut() else {
            return;
        };
        let Some(tab) = self.tabs.get(index) else {
            return;
        };
        pane.insert_row(index, tab.id, tab.mirror_text());
    }

    /// Drop the side-pane row of a tab.
    pub fn mirror_remove(&mut self, tab: TabId) {
        if let Some(pane) = self.side_pane.as_mut() {
            pane.remove_row(tab);
        }
    }

    /// Refresh the side-pane row of the tab at `index`.
    pub fn mirror_update(&mut self, index: usize) {
        let Some(pane) = self.side_pane.as_mut() else {
            return;
        };
        let Some(tab) = self.tabs.get(index) else {
            return;
        };
        pane.update_row(tab.id, tab.mirror_text());
    }

    /// Capture the mirror state relocation reproduces on the other side.
    pub fn snapshot_tab(&self, index: usize) -> Option<ViewSnapshot> {
        let tab = self.tabs.get(index)?;
        Some(ViewSnapshot {
            title: tab.display_title(),
            tooltip: tab.tooltip(),
            toggles: tab.view,
            status_bar: self.show_status_bar,
            cursor_position: self.show_cursor_position,
            search_highlighted: tab.search.is_highlighted(),
        })
    }

    /// Unwire and remove the tab at `index`, fixing mirror, selection,
    /// and title. The tab no longer belongs to this window on return.
    pub(crate) fn take_tab(&mut self, index: usize) -> Option<Tab> {
        match self.tabs.get_mut(index) {
            Some(tab) => {
                if wiring::detach(tab).is_none() {
                    log::warn!("Tab {} had no wiring while leaving window {}", tab.id, self.id);
                }
            }
            None => return None,
        }
        let tab = self.tabs.remove_tab_at(index)?;
        self.mirror_remove(tab.id);
        self.sync_title();
        Some(tab)
    }

    /// Start relocating the tab at `index`: snapshot its mirror state,
    /// then take it out of this window.
    pub fn release_tab(&mut self, index: usize) -> Option<TabInTransit> {
        let snapshot = self.snapshot_tab(index)?;
        let tab = self.take_tab(index)?;
        Some(TabInTransit::new(tab, snapshot, self.id))
    }

    /// Whether the side pane (if present) mirrors the strip row-for-row.
    pub fn mirror_consistent(&self) -> bool {
        let Some(pane) = &self.side_pane else {
            return true;
        };
        if pane.len() != self.tabs.len() {
            return false;
        }
        self.tabs
            .tabs()
            .iter()
            .enumerate()
            .all(|(i, tab)| pane.tab_at(i) == Some(tab.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pane_config() -> Config {
        let mut config = Config::default();
        config.side_pane = true;
        config
    }

    fn wired_tab(id: TabId, window: WindowId) -> Tab {
        let mut tab = Tab::new_stub(id);
        wiring::attach(&mut tab, window);
        tab
    }

    #[test]
    fn empty_window_title() {
        let window = EditorWindow::new(1, &Config::default());
        assert_eq!(window.title, "Quillpad");
        assert!(window.mirror_consistent());
    }

    #[test]
    fn add_tab_updates_mirror_and_title() {
        let mut window = EditorWindow::new(1, &pane_config());
        let mut tab = wired_tab(10, 1);
        tab.path = Some(PathBuf::from("/tmp/notes.txt"));
        window.add_tab(tab);

        assert_eq!(window.title, "notes.txt - Quillpad");
        assert!(window.mirror_consistent());
        let pane = window.side_pane.as_ref().unwrap();
        assert_eq!(pane.rows()[0].text, "notes.txt");
    }

    #[test]
    fn title_marks_modified_documents() {
        let mut window = EditorWindow::new(1, &Config::default());
        window.add_tab(wired_tab(10, 1));
        window.tabs.get_mut(0).unwrap().set_text("draft");
        window.mirror_update(0);
        window.sync_title();
        assert_eq!(window.title, "Untitled* - Quillpad");
    }

    #[test]
    fn take_tab_keeps_everything_in_step() {
        let mut window = EditorWindow::new(1, &pane_config());
        window.add_tab(wired_tab(10, 1));
        window.add_tab(wired_tab(11, 1));

        let taken = window.take_tab(0).expect("tab exists");
        assert_eq!(taken.id, 10);
        assert!(taken.wiring.is_none());
        assert_eq!(window.tabs.len(), 1);
        assert!(window.mirror_consistent());
        assert_eq!(window.title, "Untitled - Quillpad");

        assert!(window.take_tab(5).is_none());
    }

    #[test]
    fn snapshot_captures_window_and_tab_state() {
        let mut config = pane_config();
        config.show_status_bar = false;
        let mut window = EditorWindow::new(1, &config);
        let mut tab = wired_tab(10, 1);
        tab.path = Some(PathBuf::from("/tmp/a.txt"));
        window.add_tab(tab);

        let snapshot = window.snapshot_tab(0).expect("snapshot");
        assert_eq!(snapshot.title, "a.txt");
        assert_eq!(snapshot.tooltip, "/tmp/a.txt");
        assert!(!snapshot.status_bar);
        assert!(!snapshot.search_highlighted);
    }
}
