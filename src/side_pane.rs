//! Side-pane mirror of a window's tab strip.
//!
//! When the side pane is enabled, each tab has exactly one row, in strip
//! order, showing the tab title with a `*` suffix while the document is
//! modified. The window keeps this mirror in lockstep with its
//! `TabCollection`: every insert, remove, and title change is applied to
//! both in the same operation.

use quillpad_config::TabId;

/// One row of the side pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideRow {
    /// Tab this row mirrors.
    pub tab: TabId,
    /// Displayed text, already carrying the `*` suffix when modified.
    pub text: String,
}

/// All rows of one window's side pane, in tab-strip order.
#[derive(Debug, Default)]
pub struct SidePaneMirror {
    rows: Vec<SideRow>,
}

impl SidePaneMirror {
    /// Create an empty mirror.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Rows in strip order.
    pub fn rows(&self) -> &[SideRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the pane has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a row at a position, clamped to the current row count.
    pub fn insert_row(&mut self, index: usize, tab: TabId, text: String) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, SideRow { tab, text });
    }

    /// Remove the row for a tab. Unknown tabs are ignored.
    pub fn remove_row(&mut self, tab: TabId) {
        self.rows.retain(|r| r.tab != tab);
    }

    /// Replace the text of a tab's row. Unknown tabs are ignored.
    pub fn update_row(&mut self, tab: TabId, text: String) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.tab == tab) {
            row.text = text;
        }
    }

    /// Row index of a tab, if present.
    pub fn row_of(&self, tab: TabId) -> Option<usize> {
        self.rows.iter().position(|r| r.tab == tab)
    }

    /// Tab mirrored by a row, if the index is in range.
    pub fn tab_at(&self, row: usize) -> Option<TabId> {
        self.rows.get(row).map(|r| r.tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_strip_order() {
        let mut pane = SidePaneMirror::new();
        pane.insert_row(0, 1, "a.txt".to_string());
        pane.insert_row(1, 2, "b.txt".to_string());
        pane.insert_row(1, 3, "c.txt".to_string());
        assert_eq!(
            pane.rows().iter().map(|r| r.tab).collect::<Vec<_>>(),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn insert_clamps_the_index() {
        let mut pane = SidePaneMirror::new();
        pane.insert_row(42, 1, "a.txt".to_string());
        assert_eq!(pane.row_of(1), Some(0));
    }

    #[test]
    fn update_replaces_row_text() {
        let mut pane = SidePaneMirror::new();
        pane.insert_row(0, 1, "a.txt".to_string());
        pane.update_row(1, "a.txt*".to_string());
        assert_eq!(pane.rows()[0].text, "a.txt*");
        pane.update_row(9, "ignored".to_string());
        assert_eq!(pane.len(), 1);
    }

    #[test]
    fn remove_drops_only_the_matching_row() {
        let mut pane = SidePaneMirror::new();
        pane.insert_row(0, 1, "a".to_string());
        pane.insert_row(1, 2, "b".to_string());
        pane.remove_row(1);
        assert_eq!(pane.len(), 1);
        assert_eq!(pane.tab_at(0), Some(2));
        pane.remove_row(99);
        assert_eq!(pane.len(), 1);
    }
}
