//! Cross-window tab relocation.
//!
//! Both entry points run the same choreography: release the tab from its
//! source window (snapshot, unwire, remove), adopt it into the
//! destination (rewire, reconcile view state, re-highlight search), then
//! move focus. Relocation never prompts and never touches disk; invalid
//! input is a guarded no-op so a drag gesture can always finish cleanly.

use quillpad_config::WindowId;

use crate::scheduler::Task;

use super::{App, EditorWindow};

impl App {
    /// Move the tab at `position` out of `source` into a brand-new
    /// window. Returns the new window's id, or `None` for the guarded
    /// no-ops (unknown window, bad position, or the window's only tab).
    pub fn detach_tab(&mut self, source: WindowId, position: usize) -> Option<WindowId> {
        let win = self.windows.get_mut(&source)?;
        if win.tabs.len() <= 1 {
            log::debug!("Not detaching the only tab of window {}", source);
            return None;
        }
        if position >= win.tabs.len() {
            log::debug!("No tab at {} in window {}", position, source);
            return None;
        }

        let busy = win.busy.clone();
        busy.set(true);
        let _pause = self.autosave.pause(busy);

        // The grab must go before the strip mutates under a fast drag; the
        // deferred task keeps handlers of the current event consistent.
        self.tasks.defer(Task::ReleaseDragGrab { window: source });

        let transit = self
            .windows
            .get_mut(&source)
            .and_then(|w| w.release_tab(position))?;
        let tab = transit.tab_id();

        let dest = self.mint_window_id();
        let mut dest_win = EditorWindow::new(dest, &self.config);
        let report = transit.attach_to(&mut dest_win, 0);
        self.windows.insert(dest, dest_win);
        self.focused_window = Some(dest);

        log::info!(
            "Detached tab {} from window {} into new window {} ({} view adjustments, search rehighlighted: {})",
            tab,
            source,
            dest,
            report.adjustments.len(),
            report.rehighlighted
        );
        Some(dest)
    }

    /// Move the tab at `source_position` in `source` into `dest` at
    /// `insert_at`. Returns `false` for the guarded no-ops (same window,
    /// unknown windows, bad position) so the originating drag can finish
    /// instead of leaving a stuck grab. A source window emptied by the
    /// move is scheduled for closure.
    pub fn drop_tab(
        &mut self,
        source: WindowId,
        source_position: usize,
        dest: WindowId,
        insert_at: usize,
    ) -> bool {
        let Some(src) = self.windows.get(&source) else {
            return false;
        };
        // Every rejection below still releases the source's drag grab, so
        // a refused drop can never leave the pointer grabbed.
        if source == dest {
            log::debug!("Tab dropped back onto window {}, ignoring", source);
            self.tasks.defer(Task::ReleaseDragGrab { window: source });
            return false;
        }
        if !self.windows.contains_key(&dest) {
            log::debug!("Drop target window {} does not exist", dest);
            self.tasks.defer(Task::ReleaseDragGrab { window: source });
            return false;
        }
        if source_position >= src.tabs.len() {
            log::debug!("No tab at {} in window {}", source_position, source);
            self.tasks.defer(Task::ReleaseDragGrab { window: source });
            return false;
        }

        let busy = src.busy.clone();
        busy.set(true);
        let _pause = self.autosave.pause(busy);

        self.tasks.defer(Task::ReleaseDragGrab { window: source });

        // Owning the destination for the move guarantees the tab lands
        // somewhere; it goes back into the registry right after.
        let Some(mut dest_win) = self.windows.remove(&dest) else {
            return false;
        };
        let transit = match self
            .windows
            .get_mut(&source)
            .and_then(|w| w.release_tab(source_position))
        {
            Some(transit) => transit,
            None => {
                self.windows.insert(dest, dest_win);
                return false;
            }
        };
        let tab = transit.tab_id();
        let report = transit.attach_to(&mut dest_win, insert_at);
        self.windows.insert(dest, dest_win);

        log::info!(
            "Moved tab {} from window {} to window {} at {} ({} view adjustments)",
            tab,
            source,
            dest,
            report.index,
            report.adjustments.len()
        );

        let source_empty = self
            .windows
            .get(&source)
            .is_some_and(|w| w.tabs.is_empty());
        if source_empty {
            log::info!("Window {} is empty after the move, scheduling close", source);
            self.tasks.defer(Task::CloseWindow { window: source });
        }
        self.focused_window = Some(dest);
        true
    }
}
