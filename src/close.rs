//! Value types for the batch-close protocol.
//!
//! Closing runs over an open interval of tab positions and walks it from
//! the right edge leftwards, deleting as it goes. The interval arithmetic
//! lives here as [`CloseRange`] so the index shifting that happens while
//! tabs disappear is testable on its own, away from any window state.

/// Result of resolving one tab during a batch close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The tab may be deleted: it was clean, was saved, or the user chose
    /// to discard its changes.
    Saved,
    /// The user cancelled, or saving failed, or another window already
    /// holds the blocking dialog. The batch stops here.
    Undecided,
    /// The user chose "No to all": delete this tab and every further tab
    /// in the batch without prompting again.
    Discarded,
}

/// Request to keep closing to the left once the current range is done.
///
/// Produced only by close-other-tabs style operations: the first pass
/// closes everything right of the kept tab, then this carries the kept
/// tab's position so a second pass can close everything left of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    /// Everything strictly left of this position is closed by the
    /// follow-up pass.
    pub left_boundary: i64,
}

/// An open interval `(first, last)` over tab positions.
///
/// `-1` for `first` opens the interval at the start; `-1` (or any value
/// past the tab count) for `last` opens it at the end. Both bounds are
/// exclusive, so `(k, k+1)` is empty. The interval lives only for the
/// duration of one close operation.
#[derive(Debug, Clone, Copy)]
pub struct CloseRange {
    first: i64,
    last: i64,
}

impl CloseRange {
    pub fn new(first: i64, last: i64) -> Self {
        Self { first, last }
    }

    /// Effective exclusive right bound for a given tab count.
    fn upper(&self, tab_count: usize) -> i64 {
        let count = tab_count as i64;
        if self.last < 0 || self.last > count {
            count
        } else {
            self.last
        }
    }

    /// Rightmost position still inside the interval, if any.
    pub fn rightmost_inside(&self, tab_count: usize) -> Option<usize> {
        let candidate = self.upper(tab_count) - 1;
        if candidate > self.first && candidate >= 0 {
            Some(candidate as usize)
        } else {
            None
        }
    }

    /// Account for one deletion inside the interval: a bounded right edge
    /// shifts left with the tab count, an open one stays open.
    pub fn note_deleted(&mut self) {
        if self.last > 0 {
            self.last -= 1;
        }
    }

    /// How many positions are currently inside the interval.
    pub fn remaining(&self, tab_count: usize) -> usize {
        let lower = self.first.max(-1);
        (self.upper(tab_count) - 1 - lower).max(0) as usize
    }

    /// Whether a position lies strictly inside the interval.
    pub fn contains(&self, index: usize, tab_count: usize) -> bool {
        let index = index as i64;
        index > self.first && index < self.upper(tab_count)
    }
}
