//! Per-editor view toggles and their reconciliation during relocation.
//!
//! A tab's editor carries its own copy of the view toggles; the owning
//! window carries the authoritative menu state. When a tab changes windows
//! the destination's settings win, but wrap, auto-indent, and line numbers
//! are applied as individual adjustments only where they actually differ,
//! so a fast drag does not churn editor state that already matches.

use quillpad_config::Config;

/// View toggles shared between a window's menu state and each editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToggles {
    /// Wrap long lines at the window edge.
    pub word_wrap: bool,
    /// Repeat the previous line's leading whitespace on Enter.
    pub auto_indent: bool,
    /// Show the line-number margin.
    pub line_numbers: bool,
    /// Syntax highlighting enabled.
    pub syntax_highlight: bool,
}

impl ViewToggles {
    /// Toggles for a newly created window, taken from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            word_wrap: config.word_wrap,
            auto_indent: config.auto_indent,
            line_numbers: config.line_numbers,
            syntax_highlight: config.syntax_highlight,
        }
    }
}

/// Everything relocation captures from the source window before a tab
/// moves: enough to reproduce the user-visible experience on the other
/// side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Display title of the tab at the moment of capture.
    pub title: String,
    /// Tooltip text (the full path, or the display title for untitled
    /// documents).
    pub tooltip: String,
    /// The editor's view toggles in the source window.
    pub toggles: ViewToggles,
    /// Whether the source window showed its status bar.
    pub status_bar: bool,
    /// Whether the source window showed the cursor position readout.
    pub cursor_position: bool,
    /// Whether a search term was highlighted in the tab.
    pub search_highlighted: bool,
}

/// One view change applied to an editor while it is adopted by a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAdjustment {
    /// Word wrap switched to the destination's value.
    WordWrap(bool),
    /// Auto-indent switched to the destination's value.
    AutoIndent(bool),
    /// Line numbers switched to the destination's value.
    LineNumbers(bool),
}

/// Bring an adopted editor's toggles in line with the destination window.
///
/// Wrap, auto-indent, and line numbers produce an explicit adjustment only
/// where the editor differs from the destination; syntax highlighting
/// simply follows the destination.
pub fn reconcile(editor: &mut ViewToggles, dest: &ViewToggles) -> Vec<ViewAdjustment> {
    let mut applied = Vec::new();
    if editor.word_wrap != dest.word_wrap {
        editor.word_wrap = dest.word_wrap;
        applied.push(ViewAdjustment::WordWrap(dest.word_wrap));
    }
    if editor.auto_indent != dest.auto_indent {
        editor.auto_indent = dest.auto_indent;
        applied.push(ViewAdjustment::AutoIndent(dest.auto_indent));
    }
    if editor.line_numbers != dest.line_numbers {
        editor.line_numbers = dest.line_numbers;
        applied.push(ViewAdjustment::LineNumbers(dest.line_numbers));
    }
    editor.syntax_highlight = dest.syntax_highlight;
    applied
}
