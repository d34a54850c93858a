//! Window creation and teardown.
//!
//! Windows close through the batch-close protocol: a window only goes
//! away once every one of its tabs was resolved (saved, discarded, or
//! already clean), or once relocation emptied it. Shutdown walks the
//! windows the same way and stops at the first one the user keeps open.

use quillpad_config::WindowId;

use crate::tab::Tab;
use crate::wiring;

use super::{App, EditorWindow};

impl App {
    /// Open a new window holding one untitled tab. The window becomes
    /// focused.
    pub fn create_window(&mut self) -> WindowId {
        let id = self.mint_window_id();
        let tab_id = self.mint_tab_id();
        let mut window = EditorWindow::new(id, &self.config);
        let mut tab = Tab::new_untitled(tab_id, window.toggles, &self.config.default_encoding);
        wiring::attach(&mut tab, id);
        window.add_tab(tab);
        self.windows.insert(id, window);
        self.focused_window = Some(id);
        log::info!("Created window {}", id);
        id
    }

    /// Ask to close a window, running the batch-close protocol over all
    /// of its tabs. Returns `true` when the window actually closed.
    ///
    /// Closing the last window records the open files in session memory
    /// first, so the next run can offer to reopen them.
    pub fn request_window_close(&mut self, window: WindowId) -> bool {
        if !self.windows.contains_key(&window) {
            return false;
        }
        let last_window = self.windows.len() == 1;
        if last_window {
            self.session.clear_last_files();
        }
        let keep_open = self.close_pages(window, -1, -1, last_window, None);
        if keep_open {
            log::info!("Window {} stays open, close was cancelled", window);
            return false;
        }
        self.close_window_now(window);
        true
    }

    /// Shut the whole application down window by window. Returns `false`
    /// if the user cancelled somewhere; windows already emptied by then
    /// stay closed.
    pub fn quit(&mut self) -> bool {
        log::info!("Quit requested, closing {} windows", self.windows.len());
        self.session.clear_last_files();
        for window in self.window_ids() {
            let keep_open = self.close_pages(window, -1, -1, true, None);
            if keep_open {
                log::info!("Quit cancelled in window {}", window);
                return false;
            }
            self.close_window_now(window);
        }
        self.should_exit = true;
        true
    }

    /// Remove a window from the registry immediately. Used after its last
    /// tab was resolved, and by the deferred close of relocation-emptied
    /// windows.
    pub(crate) fn close_window_now(&mut self, window: WindowId) {
        let Some(win) = self.windows.remove(&window) else {
            return;
        };
        log::info!("Closed window {} ({} tabs left in it)", window, win.tabs.len());
        if self.active_blocking_dialog == Some(window) {
            self.active_blocking_dialog = None;
        }
        if self.focused_window == Some(window) {
            self.focused_window = self.window_ids().first().copied();
        }
        if self.windows.is_empty() {
            log::info!("Last window closed, exiting");
            self.should_exit = true;
        }
    }
}
