//! Shared identifier types used across the workspace.

/// Unique identifier for a tab.
///
/// Minted by the application registry from a monotonically increasing
/// counter; never reused within a process, and stable across cross-window
/// relocation (the tab keeps its id when it changes owner).
pub type TabId = u64;

/// Unique identifier for a top-level editor window.
///
/// Minted by the application registry alongside [`TabId`]; window ids are
/// never reused within a process.
pub type WindowId = u64;
