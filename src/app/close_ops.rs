//! The batch-close protocol.
//!
//! Closing works over an open interval of tab positions and walks it from
//! the right, resolving one tab at a time: clean tabs pass silently,
//! modified ones go through the save prompt. Cancelling stops the batch
//! where it stands; "No to all" finishes it without further questions.
//! Autosave is paused and the window is marked busy for the whole
//! operation, whatever exit is taken.

use quillpad_config::WindowId;

use crate::close::{CloseRange, Continuation, PromptOutcome};
use crate::dialog::{SaveChoice, SavePromptRequest};

use super::App;

impl App {
    /// Close every tab strictly between `first` and `last`, rightmost
    /// first; `-1` opens either bound. Returns `true` when the user
    /// cancelled and the window must stay open.
    ///
    /// `remember` records closed files in session memory, up to the cap;
    /// once the cap is reached, recording silently stops for the rest of
    /// the operation. `continuation` requests a second pass that closes
    /// everything left of its boundary after this range is done.
    pub fn close_pages(
        &mut self,
        window: WindowId,
        first: i64,
        last: i64,
        remember: bool,
        continuation: Option<Continuation>,
    ) -> bool {
        let Some(win) = self.windows.get_mut(&window) else {
            return false;
        };
        log::debug!(
            "Closing pages inside ({}, {}) of window {} ({} tabs)",
            first,
            last,
            window,
            win.tabs.len()
        );

        let busy = win.busy.clone();
        busy.set(true);
        let _pause = self.autosave.pause(busy);

        let mut range = CloseRange::new(first, last);
        let mut continuation = continuation;

        // Selection to put back afterwards, unless it is itself being
        // closed.
        let prev_current = win.tabs.current_index().and_then(|current| {
            if range.contains(current, win.tabs.len()) {
                None
            } else {
                win.tabs.get(current).map(|t| t.id)
            }
        });

        let mut keep_open = false;

        loop {
            let count = self.tab_count(window);
            let Some(index) = range.rightmost_inside(count) else {
                break;
            };
            let allow_no_to_all = range.remaining(count) > 1;

            match self.save_prompt(window, index, allow_no_to_all) {
                PromptOutcome::Saved => {
                    self.delete_tab_page(window, index, remember);
                    range.note_deleted();
                }
                PromptOutcome::Undecided => {
                    keep_open = true;
                    continuation = None;
                    break;
                }
                PromptOutcome::Discarded => {
                    // Everything still in range goes, then everything left
                    // of the boundary if a follow-up pass was requested.
                    while let Some(index) = range.rightmost_inside(self.tab_count(window)) {
                        self.delete_tab_page(window, index, remember);
                        range.note_deleted();
                    }
                    if let Some(c) = continuation {
                        let boundary = (c.left_boundary.max(0) as usize).min(self.tab_count(window));
                        for index in (0..boundary).rev() {
                            self.delete_tab_page(window, index, remember);
                        }
                    }
                    log::debug!("Remaining tabs discarded without prompting");
                    return false;
                }
            }
        }

        if let Some(id) = prev_current {
            if let Some(win) = self.windows.get_mut(&window) {
                if let Some(index) = win.tabs.index_of(id) {
                    win.tabs.select(index);
                    win.sync_title();
                }
            }
        }
        if !keep_open {
            if let Some(c) = continuation {
                return self.close_pages(window, -1, c.left_boundary, remember, None);
            }
        }
        keep_open
    }

    /// Resolve one tab ahead of deletion: clean tabs pass silently,
    /// otherwise the tab is made current and the user is asked. A clean
    /// tab whose backing file vanished counts as modified.
    pub(crate) fn save_prompt(
        &mut self,
        window: WindowId,
        index: usize,
        allow_no_to_all: bool,
    ) -> PromptOutcome {
        let (modified, title, path) = {
            let Some(win) = self.windows.get(&window) else {
                return PromptOutcome::Undecided;
            };
            let Some(tab) = win.tabs.get(index) else {
                return PromptOutcome::Undecided;
            };
            (tab.modified, tab.display_title(), tab.path.clone())
        };

        let file_gone = path.as_ref().is_some_and(|p| !self.store.exists(p));
        if !modified && !file_gone {
            return PromptOutcome::Saved;
        }

        if let Err(holder) = self.acquire_dialog(window) {
            self.warn_dialog_conflict(window, holder);
            return PromptOutcome::Undecided;
        }

        if let Some(win) = self.windows.get_mut(&window) {
            win.tabs.select(index);
            win.sync_title();
        }
        self.focused_window = Some(window);

        let request = SavePromptRequest {
            window,
            title,
            path,
            allow_no_to_all,
        };
        let choice = self.dialogs.ask_save(&request);
        log::debug!("Save prompt for \"{}\" answered {:?}", request.title, choice);

        let outcome = match choice {
            SaveChoice::Save => {
                if self.save_tab(window, index) {
                    PromptOutcome::Saved
                } else {
                    PromptOutcome::Undecided
                }
            }
            SaveChoice::Discard => PromptOutcome::Saved,
            SaveChoice::Cancel => PromptOutcome::Undecided,
            SaveChoice::NoToAll => PromptOutcome::Discarded,
        };
        self.release_dialog(window);
        outcome
    }

    /// Save the tab at `index`. Untitled documents ask for a destination
    /// first. Returns `false` when the user backs out of the picker or the
    /// write fails; the tab keeps its state in that case.
    pub fn save_tab(&mut self, window: WindowId, index: usize) -> bool {
        let (title, text, encoding, path, uneditable) = {
            let Some(win) = self.windows.get(&window) else {
                return false;
            };
            let Some(tab) = win.tabs.get(index) else {
                return false;
            };
            (
                tab.display_title(),
                tab.text.clone(),
                tab.encoding.clone(),
                tab.path.clone(),
                tab.uneditable,
            )
        };
        if uneditable {
            log::warn!("Not saving \"{}\": the content cannot round-trip", title);
            return false;
        }

        let path = match path {
            Some(path) => path,
            None => {
                // Needs a destination, which opens a blocking file dialog.
                if let Err(holder) = self.acquire_dialog(window) {
                    self.warn_dialog_conflict(window, holder);
                    return false;
                }
                let picked = self.dialogs.pick_save_path(window, &title);
                self.release_dialog(window);
                match picked {
                    Some(path) => path,
                    None => {
                        log::debug!("No destination chosen for \"{}\"", title);
                        return false;
                    }
                }
            }
        };

        match self.store.save(&path, &text, &encoding) {
            Ok(record) => {
                if let Some(win) = self.windows.get_mut(&window) {
                    if let Some(tab) = win.tabs.get_mut(index) {
                        tab.path = Some(path.clone());
                        tab.mark_saved(record);
                    }
                    win.mirror_update(index);
                    win.sync_title();
                }
                log::info!("Saved {:?}", path);
                true
            }
            Err(err) => {
                log::warn!("Saving {:?} failed: {:#}", path, err);
                self.dialogs
                    .warn(window, &format!("{} cannot be saved.", path.display()));
                false
            }
        }
    }

    /// Remove one tab unconditionally, recording its file and cursor in
    /// session memory as configured. No prompting happens here.
    pub(crate) fn delete_tab_page(&mut self, window: WindowId, index: usize, remember: bool) {
        let Some(win) = self.windows.get_mut(&window) else {
            return;
        };
        match win.tabs.get(index) {
            Some(tab) => {
                if let Some(path) = tab.path.clone() {
                    let cursor = tab.cursor;
                    if remember && self.config.remember_last_files && !self.session.files_full() {
                        self.session.remember_file(&path);
                    }
                    if self.config.remember_cursor_positions {
                        self.session.remember_cursor(&path, cursor);
                    }
                }
            }
            None => return,
        }
        if let Some(tab) = win.take_tab(index) {
            log::debug!(
                "Deleted tab {} at index {} of window {}",
                tab.id,
                index,
                window
            );
        }
    }

    /// Close the tab at `index`, prompting if needed. Returns `true` when
    /// the user cancelled.
    pub fn close_tab(&mut self, window: WindowId, index: usize) -> bool {
        self.close_pages(window, index as i64 - 1, index as i64 + 1, false, None)
    }

    /// Close every tab left of `index`.
    pub fn close_left_tabs(&mut self, window: WindowId, index: usize) -> bool {
        self.close_pages(window, -1, index as i64, false, None)
    }

    /// Close every tab right of `index`.
    pub fn close_right_tabs(&mut self, window: WindowId, index: usize) -> bool {
        self.close_pages(window, index as i64, -1, false, None)
    }

    /// Close every tab except the one at `index`: everything to its right
    /// first, then everything to its left.
    pub fn close_other_tabs(&mut self, window: WindowId, index: usize) -> bool {
        self.close_pages(
            window,
            index as i64,
            -1,
            false,
            Some(Continuation {
                left_boundary: index as i64,
            }),
        )
    }

    fn warn_dialog_conflict(&mut self, window: WindowId, holder: WindowId) {
        let holder_title = self
            .windows
            .get(&holder)
            .map(|w| w.title.clone())
            .unwrap_or_else(|| format!("window {holder}"));
        log::warn!(
            "Refusing a dialog for window {}: window {} already shows one",
            window,
            holder
        );
        self.dialogs.warn(
            window,
            &format!("Close the dialog in \"{holder_title}\" first."),
        );
    }
}
