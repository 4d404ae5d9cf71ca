//! One-shot timer queue for scheduled session tasks.
//!
//! There is no cancellation. A restart leaves old entries in place and the
//! session drops them by generation when they fire.

use tokio::time::Instant;

use crate::session::ScheduledTask;

/// Pending tasks ordered by deadline. Ties keep scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<(Instant, ScheduledTask)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task to fire `task.delay` from now. Returns its deadline.
    pub fn schedule(&mut self, task: ScheduledTask) -> Instant {
        self.schedule_at(Instant::now() + task.delay, task)
    }

    /// Queue a task at an explicit deadline.
    pub fn schedule_at(&mut self, deadline: Instant, task: ScheduledTask) -> Instant {
        let position = self.entries.partition_point(|(due, _)| *due <= deadline);
        self.entries.insert(position, (deadline, task));
        deadline
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|(due, _)| *due)
    }

    /// Remove and return the earliest task if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<ScheduledTask> {
        match self.entries.first() {
            Some((due, _)) if *due <= now => Some(self.entries.remove(0).1),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
