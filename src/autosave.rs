//! Autosave pause tracking.
//!
//! Batch close and relocation must not race the background save pass, so
//! both pause autosave for their whole duration. The pause is a scope
//! guard: however the operation exits, autosave resumes exactly once and
//! the window's busy indicator is cleared. Pauses nest; autosave runs only
//! while no guard is alive.

use std::cell::Cell;
use std::rc::Rc;

/// Autosave coordination state shared with pause guards.
#[derive(Debug, Default)]
pub struct Autosave {
    pause_depth: Rc<Cell<u32>>,
}

impl Autosave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any pause guard is currently alive.
    pub fn is_paused(&self) -> bool {
        self.pause_depth.get() > 0
    }

    /// Pause autosave until the returned guard drops. The guard also
    /// clears `busy` when it drops, whatever path the operation took out.
    pub fn pause(&self, busy: Rc<Cell<bool>>) -> PauseScope {
        self.pause_depth.set(self.pause_depth.get() + 1);
        PauseScope {
            depth: Rc::clone(&self.pause_depth),
            busy,
        }
    }
}

/// Guard for one paused operation.
#[derive(Debug)]
pub struct PauseScope {
    depth: Rc<Cell<u32>>,
    busy: Rc<Cell<bool>>,
}

impl Drop for PauseScope {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
        self.busy.set(false);
    }
}
