//! Subscription wiring between a tab's editor and its owning window.
//!
//! A tab inside a window holds the complete set of event subscriptions
//! tying it to that window; a tab in transit between windows holds none.
//! Attach and detach replace the whole set in one step, so partial wiring
//! cannot be observed: a moved editor never fires events into a window it
//! no longer belongs to.

use quillpad_config::WindowId;

use crate::tab::Tab;

/// The event subscriptions a window maintains for each of its tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSignal {
    /// Status-bar text updates.
    StatusText,
    /// Word-count cache invalidation on edits.
    WordCount,
    /// Undo/redo action enablement mirroring.
    UndoRedo,
    /// Copy/cut/paste enablement.
    Clipboard,
    /// Bracket-match highlighting.
    BracketMatch,
    /// Block-count-driven reformatting.
    Reformat,
    /// Files dropped onto the editor area.
    FileDrop,
    /// Context-menu routing.
    ContextMenu,
}

impl TabSignal {
    /// Every subscription a window maintains per tab.
    pub const ALL: [TabSignal; 8] = [
        TabSignal::StatusText,
        TabSignal::WordCount,
        TabSignal::UndoRedo,
        TabSignal::Clipboard,
        TabSignal::BracketMatch,
        TabSignal::Reformat,
        TabSignal::FileDrop,
        TabSignal::ContextMenu,
    ];
}

/// The full subscription set binding one tab to one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSet {
    window: WindowId,
    signals: Vec<TabSignal>,
}

impl SubscriptionSet {
    /// The complete set against `window`.
    pub fn full(window: WindowId) -> Self {
        Self {
            window,
            signals: TabSignal::ALL.to_vec(),
        }
    }

    /// Window this set is bound to.
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Subscriptions in the set.
    pub fn signals(&self) -> &[TabSignal] {
        &self.signals
    }

    /// Whether every subscription in [`TabSignal::ALL`] is present.
    pub fn is_complete(&self) -> bool {
        TabSignal::ALL.iter().all(|s| self.signals.contains(s))
    }
}

/// Bind `tab` to `window` with the complete subscription set.
pub fn attach(tab: &mut Tab, window: WindowId) {
    if let Some(old) = &tab.wiring {
        // Should only happen on a logic error; rebinding is still the
        // safest recovery.
        log::warn!(
            "Tab {} was still wired to window {} while attaching to window {}",
            tab.id,
            old.window(),
            window
        );
    }
    tab.wiring = Some(SubscriptionSet::full(window));
}

/// Remove every subscription binding `tab` to its current window,
/// returning the set that was active.
pub fn detach(tab: &mut Tab) -> Option<SubscriptionSet> {
    tab.wiring.take()
}
