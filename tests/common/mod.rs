//! Shared integration test helpers for quillpad.
//!
//! This module provides the scripted collaborator doubles (in-memory file
//! store, canned dialog answers) and factory functions used across the
//! `tests/` integration test suite.
//!
//! # Usage
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TestApp, doc_path};
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute
//! suppresses warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use quillpad::app::App;
use quillpad::config::{Config, SessionMemory, TabId, WindowId};
use quillpad::dialog::{DialogService, SaveChoice, SavePromptRequest};
use quillpad::store::{DiskRecord, FileStore};
use tokio::runtime::Runtime;

/// One document on the fake disk.
struct StoredDoc {
    text: String,
    encoding: String,
    record: DiskRecord,
}

#[derive(Default)]
struct StoreState {
    files: HashMap<PathBuf, StoredDoc>,
    failing: HashSet<PathBuf>,
    saves: Vec<PathBuf>,
    clock: u64,
}

/// In-memory [`FileStore`] with scriptable failures.
///
/// Cloning yields a handle onto the same fake disk, so a test can keep one
/// handle for inspection after boxing another into the application.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file on the fake disk without going through a save.
    pub fn seed(&self, path: &Path, text: &str) -> DiskRecord {
        let mut state = self.state.borrow_mut();
        let record = next_record(&mut state.clock, text.len() as u64);
        state.files.insert(
            path.to_path_buf(),
            StoredDoc {
                text: text.to_string(),
                encoding: "UTF-8".to_string(),
                record,
            },
        );
        record
    }

    /// Delete a file behind the editor's back.
    pub fn vanish(&self, path: &Path) {
        self.state.borrow_mut().files.remove(path);
    }

    /// Bump a file's timestamp the way an external edit would.
    pub fn touch(&self, path: &Path) -> Option<DiskRecord> {
        let mut state = self.state.borrow_mut();
        let mut record = next_record(&mut state.clock, 0);
        let doc = state.files.get_mut(path)?;
        record.size = doc.record.size;
        doc.record = record;
        Some(record)
    }

    /// Make every save to `path` fail until [`MemoryStore::allow_saves_to`].
    pub fn fail_saves_to(&self, path: &Path) {
        self.state.borrow_mut().failing.insert(path.to_path_buf());
    }

    pub fn allow_saves_to(&self, path: &Path) {
        self.state.borrow_mut().failing.remove(path);
    }

    /// Text most recently written to `path`, if any.
    pub fn saved_text(&self, path: &Path) -> Option<String> {
        self.state.borrow().files.get(path).map(|d| d.text.clone())
    }

    pub fn saved_encoding(&self, path: &Path) -> Option<String> {
        self.state
            .borrow()
            .files
            .get(path)
            .map(|d| d.encoding.clone())
    }

    pub fn record_of(&self, path: &Path) -> Option<DiskRecord> {
        self.state.borrow().files.get(path).map(|d| d.record)
    }

    /// Paths written through [`FileStore::save`], in order.
    pub fn saves(&self) -> Vec<PathBuf> {
        self.state.borrow().saves.clone()
    }
}

impl FileStore for MemoryStore {
    fn save(&mut self, path: &Path, text: &str, encoding: &str) -> anyhow::Result<DiskRecord> {
        let mut state = self.state.borrow_mut();
        if state.failing.contains(path) {
            anyhow::bail!("scripted save failure for {}", path.display());
        }
        let record = next_record(&mut state.clock, text.len() as u64);
        state.files.insert(
            path.to_path_buf(),
            StoredDoc {
                text: text.to_string(),
                encoding: encoding.to_string(),
                record,
            },
        );
        state.saves.push(path.to_path_buf());
        Ok(record)
    }

    fn exists(&self, path: &Path) -> bool {
        self.state.borrow().files.contains_key(path)
    }

    fn disk_record(&self, path: &Path) -> Option<DiskRecord> {
        self.state.borrow().files.get(path).map(|d| d.record)
    }
}

fn next_record(clock: &mut u64, size: u64) -> DiskRecord {
    *clock += 1;
    DiskRecord {
        modified: SystemTime::UNIX_EPOCH + Duration::from_secs(*clock),
        size,
    }
}

#[derive(Default)]
struct DialogScript {
    answers: VecDeque<SaveChoice>,
    save_paths: VecDeque<Option<PathBuf>>,
    prompts: Vec<SavePromptRequest>,
    warnings: Vec<(WindowId, String)>,
}

/// [`DialogService`] that replays canned answers and records everything
/// it was asked.
///
/// An exhausted answer queue yields `Cancel`, so a test that scripts too
/// few answers stops the operation instead of silently discarding tabs.
#[derive(Clone, Default)]
pub struct ScriptedDialogs {
    script: Rc<RefCell<DialogScript>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next save prompt.
    pub fn answer(&self, choice: SaveChoice) {
        self.script.borrow_mut().answers.push_back(choice);
    }

    pub fn answer_all(&self, choices: &[SaveChoice]) {
        for &choice in choices {
            self.answer(choice);
        }
    }

    /// Queue the result of the next save-location picker.
    pub fn save_path(&self, path: Option<PathBuf>) {
        self.script.borrow_mut().save_paths.push_back(path);
    }

    /// Every save prompt shown so far.
    pub fn prompts(&self) -> Vec<SavePromptRequest> {
        self.script.borrow().prompts.clone()
    }

    /// Every warning shown so far.
    pub fn warnings(&self) -> Vec<(WindowId, String)> {
        self.script.borrow().warnings.clone()
    }

    pub fn warning_count(&self) -> usize {
        self.script.borrow().warnings.len()
    }

    /// Scripted answers nobody consumed.
    pub fn unanswered(&self) -> usize {
        self.script.borrow().answers.len()
    }
}

impl DialogService for ScriptedDialogs {
    fn ask_save(&mut self, request: &SavePromptRequest) -> SaveChoice {
        let mut script = self.script.borrow_mut();
        script.prompts.push(request.clone());
        script.answers.pop_front().unwrap_or(SaveChoice::Cancel)
    }

    fn pick_save_path(&mut self, _window: WindowId, _title: &str) -> Option<PathBuf> {
        self.script.borrow_mut().save_paths.pop_front().flatten()
    }

    fn warn(&mut self, window: WindowId, message: &str) {
        self.script
            .borrow_mut()
            .warnings
            .push((window, message.to_string()));
    }
}

/// A fully wired headless application with scripted collaborators.
///
/// The store and dialog handles stay usable after construction; they share
/// state with the boxed copies inside the application.
pub struct TestApp {
    pub app: App,
    pub store: MemoryStore,
    pub dialogs: ScriptedDialogs,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let runtime = Arc::new(Runtime::new().expect("tokio runtime"));
        let store = MemoryStore::new();
        let dialogs = ScriptedDialogs::new();
        let app = App::new(
            runtime,
            config,
            SessionMemory::default(),
            Box::new(store.clone()),
            Box::new(dialogs.clone()),
        );
        Self {
            app,
            store,
            dialogs,
        }
    }

    /// Create a window holding one clean, saved document per name.
    ///
    /// The first document takes over the window's initial blank tab, the
    /// way a real file open would.
    pub fn window_with_saved_docs(&mut self, names: &[&str]) -> WindowId {
        let window = self.app.create_window();
        for name in names {
            self.add_saved_doc(window, name, "body\n");
        }
        window
    }

    /// Add a clean document backed by a seeded file, reusing a blank
    /// current tab if there is one.
    pub fn add_saved_doc(&mut self, window: WindowId, name: &str, text: &str) -> TabId {
        let path = doc_path(name);
        let record = self.store.seed(&path, text);
        let reuse = {
            let win = self.app.window(window).expect("window");
            win.tabs
                .current_index()
                .filter(|&i| win.tabs.get(i).is_some_and(|t| t.is_blank()))
        };
        let index = match reuse {
            Some(index) => index,
            None => {
                let id = self.app.new_tab(window).expect("new tab");
                let win = self.app.window(window).expect("window");
                win.tabs.index_of(id).expect("tab just added")
            }
        };
        let win = self.app.window_mut(window).expect("window");
        let id = win.tabs.get(index).expect("tab").id;
        if let Some(tab) = win.tabs.get_mut(index) {
            tab.apply_loaded(text.to_string(), path, "UTF-8".to_string(), false, Some(record));
        }
        win.tabs.select(index);
        win.mirror_update(index);
        win.sync_title();
        id
    }

    /// Type into a tab, leaving it modified.
    pub fn modify_doc(&mut self, window: WindowId, id: TabId, text: &str) {
        let win = self.app.window_mut(window).expect("window");
        let index = win.tabs.index_of(id).expect("tab present");
        if let Some(tab) = win.tabs.get_mut(index) {
            tab.set_text(text);
        }
        win.mirror_update(index);
        win.sync_title();
    }

    /// Add a modified untitled tab (never reuses an existing blank).
    pub fn add_untitled_modified(&mut self, window: WindowId, text: &str) -> TabId {
        let id = self.app.new_tab(window).expect("new tab");
        self.modify_doc(window, id, text);
        id
    }

    /// Tab ids in `window`, left to right.
    pub fn tab_ids(&self, window: WindowId) -> Vec<TabId> {
        self.app
            .window(window)
            .map(|w| w.tabs.tabs().iter().map(|t| t.id).collect())
            .unwrap_or_default()
    }

    /// Display titles in `window`, left to right.
    pub fn titles(&self, window: WindowId) -> Vec<String> {
        self.app
            .window(window)
            .map(|w| w.tabs.tabs().iter().map(|t| t.display_title()).collect())
            .unwrap_or_default()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Path used for documents on the fake disk.
pub fn doc_path(name: &str) -> PathBuf {
    PathBuf::from("/docs").join(name)
}

/// Pump until `done` holds or `tries` pumps have elapsed. Used to wait
/// out background loads, which land on their own schedule.
pub fn pump_until(app: &mut App, tries: usize, mut done: impl FnMut(&App) -> bool) -> bool {
    for _ in 0..tries {
        app.pump();
        if done(app) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}
