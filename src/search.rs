//! Per-tab search state.
//!
//! Only the part of search that travels with a tab lives here: the current
//! term and its highlight ranges. When a tab changes windows the highlight
//! is recomputed in the destination from this state.

/// Search term and highlight ranges for one tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Current search term; empty means search is inactive.
    pub term: String,
    /// Byte ranges of every match in the document, in order.
    pub matches: Vec<(usize, usize)>,
}

impl SearchState {
    /// Whether a search term is currently highlighted in this tab.
    pub fn is_highlighted(&self) -> bool {
        !self.term.is_empty()
    }

    /// Set a new term and recompute matches over `text`.
    pub fn set_term(&mut self, term: &str, text: &str) {
        self.term = term.to_string();
        self.rehighlight(text);
    }

    /// Recompute highlight ranges over `text` with the current term.
    pub fn rehighlight(&mut self, text: &str) {
        self.matches = find_matches(text, &self.term);
    }

    /// Drop the term and all highlights.
    pub fn clear(&mut self) {
        self.term.clear();
        self.matches.clear();
    }
}

/// Byte ranges of every non-overlapping occurrence of `term` in `text`.
pub fn find_matches(text: &str, term: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    if term.is_empty() {
        return out;
    }
    let mut from = 0;
    while let Some(pos) = text[from..].find(term) {
        let start = from + pos;
        out.push((start, start + term.len()));
        from = start + term.len();
    }
    out
}
