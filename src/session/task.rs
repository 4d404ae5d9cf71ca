//! Deferred session steps.
//!
//! The session never sleeps. When a step has to happen later it returns a
//! `ScheduledTask`; whoever drives the session waits `delay` and hands the
//! task back through `GameSession::fire`. Each task carries the generation it
//! was created under, and a restart bumps the generation, so tasks from a
//! previous board are recognised and dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::CardRef;

/// Restart counter. Starts at 0 for the first board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What a task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Settle two revealed cards.
    ResolvePair {
        first: CardRef,
        second: CardRef,
        matched: bool,
    },
    /// Tell the player they won.
    AnnounceWin,
}

/// One-shot deferred step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub generation: Generation,
    pub delay: Duration,
    pub kind: TaskKind,
}

impl ScheduledTask {
    #[must_use]
    pub fn resolve_pair(
        generation: Generation,
        delay: Duration,
        first: CardRef,
        second: CardRef,
        matched: bool,
    ) -> Self {
        Self {
            generation,
            delay,
            kind: TaskKind::ResolvePair {
                first,
                second,
                matched,
            },
        }
    }

    #[must_use]
    pub fn announce_win(generation: Generation, delay: Duration) -> Self {
        Self {
            generation,
            delay,
            kind: TaskKind::AnnounceWin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_advances() {
        let g = Generation::default();
        assert_eq!(g, Generation(0));
        assert_eq!(g.next(), Generation(1));
        assert!(g.next() > g);
        assert_eq!(Generation(u64::MAX).next(), Generation(0));
    }

    #[test]
    fn test_constructors() {
        let task = ScheduledTask::resolve_pair(
            Generation(2),
            Duration::from_millis(1000),
            CardRef(0),
            CardRef(3),
            true,
        );
        assert_eq!(task.generation, Generation(2));
        assert_eq!(
            task.kind,
            TaskKind::ResolvePair { first: CardRef(0), second: CardRef(3), matched: true }
        );

        let task = ScheduledTask::announce_win(Generation(2), Duration::from_millis(500));
        assert_eq!(task.kind, TaskKind::AnnounceWin);
        assert_eq!(task.delay, Duration::from_millis(500));
    }
}
