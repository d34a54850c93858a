//! Ordered tabs owned by one window.
//!
//! A `TabCollection` owns its tabs and tracks which one is current via
//! [`CurrentSelection`]. Indices are positions in the visible tab strip;
//! they shift on insert and remove, so callers that need a stable handle
//! across mutations use tab ids instead.

use quillpad_config::TabId;

use super::Tab;

/// Which tab, if any, is current in a collection.
///
/// An empty collection has no current tab; a non-empty one always has
/// exactly one. Using a sum type instead of a sentinel index makes the
/// empty case impossible to confuse with position zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentSelection {
    /// The collection is empty.
    #[default]
    NoTab,
    /// The tab at this index is current.
    TabAt(usize),
}

impl CurrentSelection {
    /// Current index, if any tab is selected.
    pub fn index(self) -> Option<usize> {
        match self {
            CurrentSelection::NoTab => None,
            CurrentSelection::TabAt(index) => Some(index),
        }
    }
}

/// The tabs of one window, ordered left to right.
#[derive(Debug, Default)]
pub struct TabCollection {
    tabs: Vec<Tab>,
    selection: CurrentSelection,
}

impl TabCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selection: CurrentSelection::NoTab,
        }
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the collection holds no tabs.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Tab at an index.
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Mutable tab at an index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    /// All tabs in strip order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// The current selection.
    pub fn selection(&self) -> CurrentSelection {
        self.selection
    }

    /// Index of the current tab, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.selection.index()
    }

    /// The current tab, if any.
    pub fn current_tab(&self) -> Option<&Tab> {
        self.current_index().and_then(|i| self.tabs.get(i))
    }

    /// The current tab, mutably, if any.
    pub fn current_tab_mut(&mut self) -> Option<&mut Tab> {
        let index = self.current_index()?;
        self.tabs.get_mut(index)
    }

    /// Index of the tab with an id, if present.
    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Make the tab at an index current. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.selection = CurrentSelection::TabAt(index);
        }
    }

    /// Append a tab and make it current.
    pub fn push_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
        self.selection = CurrentSelection::TabAt(self.tabs.len() - 1);
    }

    /// Insert a tab at a position, clamped to the strip, and make it
    /// current.
    pub fn insert_tab_at(&mut self, index: usize, tab: Tab) {
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, tab);
        self.selection = CurrentSelection::TabAt(index);
    }

    /// Remove and return the tab at an index, fixing the selection.
    ///
    /// Removing the current tab selects its right neighbor (which slides
    /// into the freed index), or the new last tab when the rightmost one
    /// was removed. Removing a tab left of the current one shifts the
    /// selection down so the same tab stays current.
    pub fn remove_tab_at(&mut self, index: usize) -> Option<Tab> {
        if index >= self.tabs.len() {
            return None;
        }
        let tab = self.tabs.remove(index);
        self.selection = match self.selection {
            CurrentSelection::NoTab => CurrentSelection::NoTab,
            CurrentSelection::TabAt(current) => {
                if self.tabs.is_empty() {
                    CurrentSelection::NoTab
                } else if current == index {
                    CurrentSelection::TabAt(index.min(self.tabs.len() - 1))
                } else if current > index {
                    CurrentSelection::TabAt(current - 1)
                } else {
                    CurrentSelection::TabAt(current)
                }
            }
        };
        Some(tab)
    }

    /// Move a tab from one position to another, keeping it current.
    /// Out-of-range positions are ignored.
    pub fn move_tab(&mut self, from: usize, to: usize) {
        if from >= self.tabs.len() || to >= self.tabs.len() || from == to {
            return;
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.selection = CurrentSelection::TabAt(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_with_ids(ids: &[TabId]) -> TabCollection {
        let mut collection = TabCollection::new();
        for &id in ids {
            collection.push_tab(Tab::new_stub(id));
        }
        collection
    }

    fn ids(collection: &TabCollection) -> Vec<TabId> {
        collection.tabs().iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_collection_has_no_selection() {
        let collection = TabCollection::new();
        assert_eq!(collection.selection(), CurrentSelection::NoTab);
        assert!(collection.current_tab().is_none());
    }

    #[test]
    fn push_selects_the_new_tab() {
        let collection = collection_with_ids(&[1, 2, 3]);
        assert_eq!(collection.selection(), CurrentSelection::TabAt(2));
        assert_eq!(collection.current_tab().map(|t| t.id), Some(3));
    }

    #[test]
    fn insert_clamps_and_selects() {
        let mut collection = collection_with_ids(&[1, 2]);
        collection.insert_tab_at(99, Tab::new_stub(3));
        assert_eq!(ids(&collection), vec![1, 2, 3]);
        assert_eq!(collection.selection(), CurrentSelection::TabAt(2));

        collection.insert_tab_at(0, Tab::new_stub(4));
        assert_eq!(ids(&collection), vec![4, 1, 2, 3]);
        assert_eq!(collection.selection(), CurrentSelection::TabAt(0));
    }

    #[test]
    fn removing_current_selects_right_neighbor() {
        let mut collection = collection_with_ids(&[1, 2, 3]);
        collection.select(1);
        let removed = collection.remove_tab_at(1).map(|t| t.id);
        assert_eq!(removed, Some(2));
        assert_eq!(collection.current_tab().map(|t| t.id), Some(3));
    }

    #[test]
    fn removing_last_current_selects_new_last() {
        let mut collection = collection_with_ids(&[1, 2, 3]);
        collection.select(2);
        collection.remove_tab_at(2);
        assert_eq!(collection.current_tab().map(|t| t.id), Some(2));
    }

    #[test]
    fn removing_left_of_current_keeps_the_same_tab_current() {
        let mut collection = collection_with_ids(&[1, 2, 3]);
        collection.select(2);
        collection.remove_tab_at(0);
        assert_eq!(collection.current_tab().map(|t| t.id), Some(3));
        assert_eq!(collection.selection(), CurrentSelection::TabAt(1));
    }

    #[test]
    fn removing_the_only_tab_empties_the_selection() {
        let mut collection = collection_with_ids(&[1]);
        collection.remove_tab_at(0);
        assert!(collection.is_empty());
        assert_eq!(collection.selection(), CurrentSelection::NoTab);
    }

    #[test]
    fn move_tab_reorders_and_follows() {
        let mut collection = collection_with_ids(&[1, 2, 3]);
        collection.move_tab(0, 2);
        assert_eq!(ids(&collection), vec![2, 3, 1]);
        assert_eq!(collection.current_tab().map(|t| t.id), Some(1));
    }

    #[test]
    fn index_of_finds_tabs_by_id() {
        let collection = collection_with_ids(&[10, 20, 30]);
        assert_eq!(collection.index_of(20), Some(1));
        assert_eq!(collection.index_of(99), None);
    }
}
