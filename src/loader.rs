//! Background document loading.
//!
//! Reading and decoding happen on the runtime's blocking pool; results
//! come back over a channel and are applied on the main thread during the
//! pump, so tab state is never touched from two threads. A failed load is
//! reported as a [`LoadSignal`] with an empty path and encoding; the
//! receiving side turns that into a warning and leaves the tab strip
//! alone.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use quillpad_config::{TabId, WindowId};

use crate::encoding;

/// A completed load, successful or not.
#[derive(Debug)]
pub struct LoadSignal {
    /// Window the load was requested for.
    pub window: WindowId,
    /// Blank tab to fill in place, or `None` to open a new tab.
    pub reuse_tab: Option<TabId>,
    /// Decoded document text; empty on failure.
    pub text: String,
    /// Path that was loaded; empty on failure.
    pub path: PathBuf,
    /// Encoding the bytes were read as; empty on failure.
    pub encoding: String,
    /// Whether the content must be opened read-only.
    pub uneditable: bool,
}

/// Classification of a [`LoadSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The signal carries document content.
    Loaded,
    /// The load failed: too large, not text, or unreadable.
    Failed,
}

impl LoadSignal {
    /// An empty path or empty encoding marks a failure.
    pub fn outcome(&self) -> LoadOutcome {
        if self.path.as_os_str().is_empty() || self.encoding.is_empty() {
            LoadOutcome::Failed
        } else {
            LoadOutcome::Loaded
        }
    }
}

/// Dispatches load requests to the blocking pool and collects results.
#[derive(Debug)]
pub struct Loader {
    tx: UnboundedSender<LoadSignal>,
    rx: UnboundedReceiver<LoadSignal>,
    tasks: Vec<JoinHandle<()>>,
}

impl Loader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    /// Start loading a file for a window.
    pub fn request(
        &mut self,
        runtime: &Runtime,
        window: WindowId,
        reuse_tab: Option<TabId>,
        path: PathBuf,
    ) {
        log::info!("Loading {:?} for window {}", path, window);
        let tx = self.tx.clone();
        let handle = runtime.spawn_blocking(move || {
            let signal = read_document(window, reuse_tab, &path);
            if tx.send(signal).is_err() {
                log::debug!("Load result for {:?} dropped, receiver is gone", path);
            }
        });
        self.tasks.push(handle);
    }

    /// Collect every load that has completed since the last poll.
    pub fn poll(&mut self) -> Vec<LoadSignal> {
        self.tasks.retain(|task| !task.is_finished());
        let mut signals = Vec::new();
        while let Ok(signal) = self.rx.try_recv() {
            signals.push(signal);
        }
        signals
    }

    /// Number of loads still in flight.
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Blocking read + decode of one file.
fn read_document(window: WindowId, reuse_tab: Option<TabId>, path: &Path) -> LoadSignal {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > encoding::MAX_LOAD_BYTES => {
            log::warn!(
                "Refusing to load {:?}: {} bytes is over the size limit",
                path,
                meta.len()
            );
            return failure_signal(window, reuse_tab);
        }
        Err(err) => {
            log::warn!("Cannot stat {:?}: {}", path, err);
            return failure_signal(window, reuse_tab);
        }
        Ok(_) => {}
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Cannot read {:?}: {}", path, err);
            return failure_signal(window, reuse_tab);
        }
    };

    match encoding::decode(&bytes) {
        Some(decoded) => LoadSignal {
            window,
            reuse_tab,
            text: decoded.text,
            path: path.to_path_buf(),
            encoding: decoded.encoding.to_string(),
            uneditable: decoded.uneditable,
        },
        None => {
            log::warn!("{:?} does not look like a text file", path);
            failure_signal(window, reuse_tab)
        }
    }
}

fn failure_signal(window: WindowId, reuse_tab: Option<TabId>) -> LoadSignal {
    LoadSignal {
        window,
        reuse_tab,
        text: String::new(),
        path: PathBuf::new(),
        encoding: String::new(),
        uneditable: false,
    }
}
