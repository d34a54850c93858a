//! Deferred next-tick work.
//!
//! Some steps must run after the handler that requested them has finished,
//! so everything still processing the current event sees the pre-mutation
//! state. Those steps go through this queue instead of ad hoc zero-delay
//! timers: the pump drains the queue exactly once per iteration, and tasks
//! deferred while draining run on the following iteration.

use std::collections::VecDeque;

use quillpad_config::{TabId, WindowId};

/// A unit of work deferred to the next pump iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Apply a tab's saved cursor position after its content was set.
    RestoreCursor { window: WindowId, tab: TabId },
    /// Release the source window's drag grab during a tab drag-out.
    ReleaseDragGrab { window: WindowId },
    /// Re-enable the tab used as the "already open elsewhere" cue.
    ReactivateTab { window: WindowId, tab: TabId },
    /// Close a window emptied by relocation.
    CloseWindow { window: WindowId },
}

/// FIFO queue of deferred tasks.
#[derive(Debug, Default)]
pub struct TaskQueue {
    queue: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next drain.
    pub fn defer(&mut self, task: Task) {
        log::debug!("Deferred task {:?}", task);
        self.queue.push_back(task);
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every task queued so far, leaving the queue empty.
    ///
    /// Tasks deferred while the returned batch is being executed land in
    /// the fresh queue and are not part of this batch.
    pub fn take_ready(&mut self) -> VecDeque<Task> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_drain_in_fifo_order() {
        let mut queue = TaskQueue::new();
        queue.defer(Task::ReleaseDragGrab { window: 1 });
        queue.defer(Task::CloseWindow { window: 1 });

        let batch: Vec<Task> = queue.take_ready().into_iter().collect();
        assert_eq!(
            batch,
            vec![
                Task::ReleaseDragGrab { window: 1 },
                Task::CloseWindow { window: 1 },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn tasks_deferred_during_a_drain_wait_for_the_next_one() {
        let mut queue = TaskQueue::new();
        queue.defer(Task::RestoreCursor { window: 1, tab: 10 });

        let batch = queue.take_ready();
        assert_eq!(batch.len(), 1);

        // Simulates a task handler deferring follow-up work.
        queue.defer(Task::ReactivateTab { window: 1, tab: 10 });
        assert_eq!(queue.len(), 1);

        let next: Vec<Task> = queue.take_ready().into_iter().collect();
        assert_eq!(next, vec![Task::ReactivateTab { window: 1, tab: 10 }]);
    }
}
