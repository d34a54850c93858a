//! Opening documents: untitled tabs, the help page, and file loads.
//!
//! File content arrives through the background loader and is applied
//! here, on the owning thread, during the pump. A file that is already
//! open anywhere is never loaded twice; the existing tab is brought to
//! the front instead.

use std::path::Path;

use quillpad_config::{TabId, WindowId};

use crate::encoding;
use crate::loader::{LoadOutcome, LoadSignal};
use crate::scheduler::Task;
use crate::tab::Tab;
use crate::wiring;

use super::App;

/// Content of the built-in help tab.
const HELP_TEXT: &str = "\
Quillpad

Every file opens in a tab; every tab lives in a window. Tabs can be
dragged out of a window to get one of their own, or dropped onto
another window.

Closing asks about unsaved changes one tab at a time, starting from
the right. \"No to all\" closes the rest of the batch without asking
again; Cancel stops where you are and loses nothing.

View settings (wrap, auto-indent, line numbers) belong to the window:
a tab adopts them when it arrives.

Settings live in config.yaml in the platform configuration directory.
";

impl App {
    /// Open a new untitled tab in `window` and make it current.
    pub fn new_tab(&mut self, window: WindowId) -> Option<TabId> {
        if !self.windows.contains_key(&window) {
            return None;
        }
        let id = self.mint_tab_id();
        let win = self.windows.get_mut(&window)?;
        let mut tab = Tab::new_untitled(id, win.toggles, &self.config.default_encoding);
        wiring::attach(&mut tab, window);
        win.add_tab(tab);
        log::debug!("Opened untitled tab {} in window {}", id, window);
        Some(id)
    }

    /// Show the help page in `window`, reusing an existing help tab.
    pub fn open_help(&mut self, window: WindowId) -> Option<TabId> {
        if let Some(win) = self.windows.get_mut(&window) {
            if let Some(index) = win.tabs.tabs().iter().position(|t| t.help) {
                win.tabs.select(index);
                win.sync_title();
                return win.tabs.get(index).map(|t| t.id);
            }
        } else {
            return None;
        }
        let id = self.mint_tab_id();
        let win = self.windows.get_mut(&window)?;
        let mut tab = Tab::new_untitled(id, win.toggles, "UTF-8");
        tab.help = true;
        tab.read_only = true;
        tab.uneditable = true;
        tab.text = HELP_TEXT.to_string();
        wiring::attach(&mut tab, window);
        win.add_tab(tab);
        log::debug!("Opened the help tab in window {}", window);
        Some(id)
    }

    /// Open a file in `window`.
    ///
    /// If the file is already open in any window, that tab is brought to
    /// the front (briefly disabled as a visual cue, re-enabled next tick)
    /// and nothing is loaded. Otherwise a background load starts; a blank
    /// current tab will host the content when it arrives. Returns whether
    /// a load was dispatched.
    pub fn open_file(&mut self, window: WindowId, path: &Path) -> bool {
        if !self.windows.contains_key(&window) {
            return false;
        }

        if let Some((other_window, index)) = self.find_open(path) {
            log::info!("{:?} is already open in window {}", path, other_window);
            let mut cue = None;
            if let Some(win) = self.windows.get_mut(&other_window) {
                if let Some(tab) = win.tabs.get_mut(index) {
                    tab.enabled = false;
                    cue = Some(tab.id);
                }
                win.tabs.select(index);
                win.sync_title();
            }
            self.focused_window = Some(other_window);
            if let Some(tab) = cue {
                self.tasks.defer(Task::ReactivateTab {
                    window: other_window,
                    tab,
                });
            }
            return false;
        }

        let reuse = self
            .windows
            .get(&window)
            .and_then(|w| w.tabs.current_tab())
            .filter(|t| t.is_blank())
            .map(|t| t.id);
        self.loader
            .request(&self.runtime, window, reuse, path.to_path_buf());
        true
    }

    /// Window and position of the tab showing `path`, if any.
    fn find_open(&self, path: &Path) -> Option<(WindowId, usize)> {
        for id in self.window_ids() {
            if let Some(win) = self.windows.get(&id) {
                if let Some(index) = win
                    .tabs
                    .tabs()
                    .iter()
                    .position(|t| t.path.as_deref() == Some(path))
                {
                    return Some((id, index));
                }
            }
        }
        None
    }

    /// Apply one completed load. Failures become a warning and leave the
    /// tab strip untouched.
    pub(crate) fn apply_load_signal(&mut self, signal: LoadSignal) {
        if signal.outcome() == LoadOutcome::Failed {
            log::warn!("A load for window {} failed", signal.window);
            let target = if self.windows.contains_key(&signal.window) {
                signal.window
            } else {
                self.focused_window.unwrap_or(signal.window)
            };
            self.dialogs.warn(
                target,
                "The file could not be opened: it may be too large, unreadable, or not text.",
            );
            return;
        }

        let LoadSignal {
            window,
            reuse_tab,
            text,
            path,
            encoding,
            uneditable,
        } = signal;

        if !self.windows.contains_key(&window) {
            log::warn!(
                "Window {} closed before its load of {:?} finished, dropping it",
                window,
                path
            );
            return;
        }

        let disk = self.store.disk_record(&path);
        let saved_cursor = if self.config.remember_cursor_positions {
            self.session.cursor_for(&path)
        } else {
            None
        };

        // Fill the blank tab the load was keyed to, if it is still blank.
        let reuse_index = reuse_tab.and_then(|id| {
            let win = self.windows.get(&window)?;
            let index = win.tabs.index_of(id)?;
            win.tabs.get(index).filter(|t| t.is_blank()).map(|_| index)
        });

        let landed_tab = match reuse_index {
            Some(index) => {
                let Some(win) = self.windows.get_mut(&window) else {
                    return;
                };
                if let Some(tab) = win.tabs.get_mut(index) {
                    tab.apply_loaded(text, path.clone(), encoding, uneditable, disk);
                    tab.saved_cursor = saved_cursor;
                }
                win.tabs.select(index);
                win.mirror_update(index);
                win.sync_title();
                reuse_tab
            }
            None => {
                let id = self.mint_tab_id();
                let Some(win) = self.windows.get_mut(&window) else {
                    return;
                };
                let mut tab = Tab::new_untitled(id, win.toggles, &self.config.default_encoding);
                wiring::attach(&mut tab, window);
                tab.apply_loaded(text, path.clone(), encoding, uneditable, disk);
                tab.saved_cursor = saved_cursor;
                win.add_tab(tab);
                Some(id)
            }
        };

        if saved_cursor.is_some() {
            if let Some(tab) = landed_tab {
                self.tasks.defer(Task::RestoreCursor { window, tab });
            }
        }
        log::info!("Opened {:?} in window {}", path, window);
    }

    /// Rewrite the tab at `index` on disk in `encoding`.
    ///
    /// Untitled tabs just switch the label for their eventual save. A
    /// titled tab is written out through the store, pending edits
    /// included; a save failure leaves the tab exactly as it was. A
    /// vanished backing file marks the document modified so the close
    /// protocol will ask about it, and refuses the change.
    pub fn enforce_encoding(&mut self, window: WindowId, index: usize, encoding: &str) -> bool {
        if !encoding::is_supported(encoding) {
            log::warn!("Unsupported encoding {:?}", encoding);
            return false;
        }
        let Some(win) = self.windows.get_mut(&window) else {
            return false;
        };
        let Some(tab) = win.tabs.get(index) else {
            return false;
        };
        let path = tab.path.clone();
        let text = tab.text.clone();

        let Some(path) = path else {
            if let Some(tab) = win.tabs.get_mut(index) {
                tab.encoding = encoding.to_string();
            }
            log::info!("Encoding in window {} set to {}", window, encoding);
            return true;
        };

        if !self.store.exists(&path) {
            // The document now only lives in this tab.
            if let Some(tab) = win.tabs.get_mut(index) {
                tab.modified = true;
            }
            win.mirror_update(index);
            win.sync_title();
            self.dialogs.warn(
                window,
                &format!(
                    "{} no longer exists on disk; save it before changing its encoding.",
                    path.display()
                ),
            );
            return false;
        }

        match self.store.save(&path, &text, encoding) {
            Ok(record) => {
                if let Some(tab) = win.tabs.get_mut(index) {
                    tab.encoding = encoding.to_string();
                    tab.mark_saved(record);
                }
                win.mirror_update(index);
                win.sync_title();
                log::info!("Rewrote {:?} as {}", path, encoding);
                true
            }
            Err(err) => {
                log::warn!("Rewriting {:?} as {} failed: {:#}", path, encoding, err);
                self.dialogs
                    .warn(window, &format!("{} cannot be saved.", path.display()));
                false
            }
        }
    }

    /// Lazy disk check when a window regains focus: any of its files may
    /// have vanished or changed behind the editor's back. One warning per
    /// divergent tab.
    pub fn window_activated(&mut self, window: WindowId) {
        let Some(win) = self.windows.get_mut(&window) else {
            return;
        };
        self.focused_window = Some(window);

        for index in 0..win.tabs.len() {
            let (path, recorded) = {
                let Some(tab) = win.tabs.get(index) else {
                    continue;
                };
                let Some(path) = tab.path.clone() else {
                    continue;
                };
                let Some(recorded) = tab.disk else {
                    continue;
                };
                (path, recorded)
            };

            match self.store.disk_record(&path) {
                None => {
                    if let Some(tab) = win.tabs.get_mut(index) {
                        tab.modified = true;
                    }
                    win.mirror_update(index);
                    win.sync_title();
                    log::warn!("{:?} vanished from disk", path);
                    self.dialogs.warn(
                        window,
                        &format!("{} no longer exists on disk.", path.display()),
                    );
                }
                Some(live) if live != recorded => {
                    // The document on disk is no longer what this tab
                    // holds, so closing must ask before overwriting it.
                    if let Some(tab) = win.tabs.get_mut(index) {
                        tab.modified = true;
                        tab.disk = Some(live);
                    }
                    win.mirror_update(index);
                    win.sync_title();
                    log::warn!("{:?} changed on disk", path);
                    self.dialogs.warn(
                        window,
                        &format!("{} was changed on disk by another program.", path.display()),
                    );
                }
                Some(_) => {}
            }
        }
    }
}
