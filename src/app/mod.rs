//! Application core for quillpad
//!
//! This module contains the editor shell's state and protocols:
//! - `App`: process-wide registry of editor windows plus the services they
//!   share (background loader, deferred-task queue, the blocking-dialog
//!   gate, autosave pause tracking)
//! - `EditorWindow`: one window's tab strip, side-pane mirror, and menu
//!   toggle state
//! - `close_ops` / `relocate_ops` / `open_ops` / `window_lifecycle`: the
//!   batch-close, tab-relocation, open/load, and window protocols as
//!   `App` methods

pub mod close_ops;
pub mod open_ops;
pub mod relocate_ops;
pub mod window;
pub mod window_lifecycle;

pub use window::EditorWindow;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Runtime;

use quillpad_config::{Config, SessionMemory, TabId, WindowId};

use crate::autosave::Autosave;
use crate::dialog::DialogService;
use crate::loader::Loader;
use crate::scheduler::{Task, TaskQueue};
use crate::store::FileStore;

/// Process-wide editor state: every window, plus the shared services.
///
/// All mutation happens on the thread that owns the `App`; the only
/// background work is file loading, whose results re-enter through
/// [`pump`](Self::pump).
pub struct App {
    /// Active configuration; applied to windows as they are created.
    pub config: Config,
    /// Files and cursor positions carried across runs.
    pub session: SessionMemory,
    windows: HashMap<WindowId, EditorWindow>,
    focused_window: Option<WindowId>,
    next_window_id: WindowId,
    next_tab_id: TabId,
    /// At most one window-modal dialog may be open process-wide; this is
    /// the window currently holding that right.
    active_blocking_dialog: Option<WindowId>,
    tasks: TaskQueue,
    autosave: Autosave,
    runtime: Arc<Runtime>,
    loader: Loader,
    store: Box<dyn FileStore>,
    dialogs: Box<dyn DialogService>,
    should_exit: bool,
}

impl App {
    /// Create the application state around its collaborators.
    pub fn new(
        runtime: Arc<Runtime>,
        config: Config,
        session: SessionMemory,
        store: Box<dyn FileStore>,
        dialogs: Box<dyn DialogService>,
    ) -> Self {
        Self {
            config,
            session,
            windows: HashMap::new(),
            focused_window: None,
            next_window_id: 1,
            next_tab_id: 1,
            active_blocking_dialog: None,
            tasks: TaskQueue::new(),
            autosave: Autosave::new(),
            runtime,
            loader: Loader::new(),
            store,
            dialogs,
            should_exit: false,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn window(&self, id: WindowId) -> Option<&EditorWindow> {
        self.windows.get(&id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut EditorWindow> {
        self.windows.get_mut(&id)
    }

    /// Ids of every live window, in ascending order.
    pub fn window_ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused_window
    }

    pub fn focus_window(&mut self, id: WindowId) {
        if self.windows.contains_key(&id) {
            self.focused_window = Some(id);
        }
    }

    /// Set once the last window closes.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Window currently holding the blocking-dialog right, if any.
    pub fn active_blocking_dialog(&self) -> Option<WindowId> {
        self.active_blocking_dialog
    }

    /// Deferred tasks waiting for the next [`pump`](Self::pump).
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// File loads still running on the blocking pool.
    pub fn loads_in_flight(&self) -> usize {
        self.loader.in_flight()
    }

    /// Whether an operation currently holds an autosave pause.
    pub fn autosave_paused(&self) -> bool {
        self.autosave.is_paused()
    }

    pub(crate) fn tab_count(&self, window: WindowId) -> usize {
        self.windows.get(&window).map_or(0, |w| w.tabs.len())
    }

    // ------------------------------------------------------------------
    // The blocking-dialog gate
    // ------------------------------------------------------------------

    /// Claim the process-wide blocking-dialog right for a window. A GUI
    /// shell calls this before opening any of its own modal dialogs so
    /// the close protocol and the shell cannot stack two.
    pub fn begin_blocking_dialog(&mut self, window: WindowId) -> bool {
        self.acquire_dialog(window).is_ok()
    }

    /// Give the blocking-dialog right back.
    pub fn end_blocking_dialog(&mut self, window: WindowId) {
        self.release_dialog(window);
    }

    /// Claim the dialog right, or learn which window holds it.
    pub(crate) fn acquire_dialog(&mut self, window: WindowId) -> Result<(), WindowId> {
        match self.active_blocking_dialog {
            Some(holder) if holder != window => Err(holder),
            _ => {
                self.active_blocking_dialog = Some(window);
                Ok(())
            }
        }
    }

    /// Release the dialog right if `window` holds it.
    pub(crate) fn release_dialog(&mut self, window: WindowId) {
        if self.active_blocking_dialog == Some(window) {
            self.active_blocking_dialog = None;
        }
    }

    // ------------------------------------------------------------------
    // Id minting
    // ------------------------------------------------------------------

    pub(crate) fn mint_window_id(&mut self) -> WindowId {
        let id = self.next_window_id;
        self.next_window_id += 1;
        id
    }

    pub(crate) fn mint_tab_id(&mut self) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // The pump
    // ------------------------------------------------------------------

    /// One iteration of the main loop: apply finished loads, then run the
    /// deferred tasks queued so far. Tasks deferred while this runs wait
    /// for the next iteration.
    pub fn pump(&mut self) {
        for signal in self.loader.poll() {
            self.apply_load_signal(signal);
        }
        for task in self.tasks.take_ready() {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::RestoreCursor { window, tab } => {
                if let Some(win) = self.windows.get_mut(&window) {
                    if let Some(index) = win.tabs.index_of(tab) {
                        if let Some(tab) = win.tabs.get_mut(index) {
                            if let Some(position) = tab.saved_cursor.take() {
                                tab.cursor = position;
                                tab.clamp_cursor();
                                log::debug!(
                                    "Restored cursor of tab {} to {}",
                                    tab.id,
                                    tab.cursor
                                );
                            }
                        }
                    }
                }
            }
            Task::ReleaseDragGrab { window } => {
                if let Some(win) = self.windows.get_mut(&window) {
                    if win.drag_active {
                        win.drag_active = false;
                        log::debug!("Released the drag grab of window {}", window);
                    }
                }
            }
            Task::ReactivateTab { window, tab } => {
                if let Some(win) = self.windows.get_mut(&window) {
                    if let Some(index) = win.tabs.index_of(tab) {
                        if let Some(tab) = win.tabs.get_mut(index) {
                            tab.enabled = true;
                        }
                        win.tabs.select(index);
                        win.sync_title();
                    }
                }
            }
            Task::CloseWindow { window } => {
                // Scheduled when relocation empties a window; skip if a
                // tab arrived in the meantime.
                if self.windows.get(&window).is_some_and(|w| w.tabs.is_empty()) {
                    self.close_window_now(window);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Autosave
    // ------------------------------------------------------------------

    /// One pass of the background save timer: silently save every modified
    /// document that has a path. Does nothing while autosave is disabled
    /// or an operation holds a pause.
    pub fn autosave_tick(&mut self) {
        if self.config.autosave_interval_secs == 0 || self.autosave.is_paused() {
            return;
        }
        for window in self.window_ids() {
            let Some(win) = self.windows.get_mut(&window) else {
                continue;
            };
            for index in 0..win.tabs.len() {
                let (path, text, encoding) = {
                    let Some(tab) = win.tabs.get(index) else {
                        continue;
                    };
                    if !tab.modified || tab.read_only || tab.uneditable {
                        continue;
                    }
                    let Some(path) = tab.path.clone() else {
                        continue;
                    };
                    (path, tab.text.clone(), tab.encoding.clone())
                };
                match self.store.save(&path, &text, &encoding) {
                    Ok(record) => {
                        if let Some(tab) = win.tabs.get_mut(index) {
                            tab.mark_saved(record);
                        }
                        win.mirror_update(index);
                        win.sync_title();
                        log::debug!("Autosaved {:?}", path);
                    }
                    Err(err) => {
                        log::warn!("Autosave of {:?} failed: {:#}", path, err);
                        self.dialogs
                            .warn(window, &format!("{} cannot be saved.", path.display()));
                    }
                }
            }
        }
    }
}
