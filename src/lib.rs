// Library exports for testing and embedding.
//
// # Threading Policy
//
// quillpad keeps all editor state on one owning thread. New code should
// follow these rules:
//
//   - `App` and everything reachable from it is single-threaded. State
//     cells use `Rc<Cell<_>>`, never `Arc<Mutex<_>>`; nothing here is
//     `Send`.
//
//   - File reads go through the tokio blocking pool (`Loader`) and come
//     back as messages over an unbounded channel. The owning thread
//     drains them in `App::pump()`; worker tasks never touch `App`.
//
//   - Anything that must run "next tick" (cursor restores, drag-grab
//     release, closing an emptied window) is deferred through
//     `TaskQueue` and also drained in `App::pump()`, once per pump.

/// Application version (root crate version, for use by sub-crates).
/// Sub-crates should receive this via parameter rather than using
/// `env!("CARGO_PKG_VERSION")` which resolves to the sub-crate's version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod autosave;
pub mod close;
pub mod config {
    //! Configuration re-exports from the `quillpad-config` sub-crate.
    pub use quillpad_config::{
        Config, ConfigError, FileCursor, MAX_REMEMBERED_FILES, MAX_SAVED_CURSORS, SessionMemory,
        TabId, WindowId,
    };
}
pub mod dialog;
pub mod encoding;
pub mod loader;
pub mod relocate;
pub mod scheduler;
pub mod search;
pub mod side_pane;
pub mod store;
pub mod tab;
pub mod view;
pub mod wiring;

pub use app::{App, EditorWindow};
pub use relocate::{AdoptReport, TabInTransit};
pub use tab::{CurrentSelection, Tab, TabCollection};
