//! Presentation collaborator.
//!
//! The session tells a `Presenter` what changed; the presenter decides how to
//! show it. Card state (face up, matched) is owned by the session, so a
//! presenter never needs to be queried.

use crate::board::{Board, CardRef};

/// Presentation trait.
///
/// Implemented by front ends (terminal, DOM bridge, ...) and by [`EventLog`]
/// for headless use.
pub trait Presenter {
    /// A new board was dealt. All cards start face down.
    fn render_board(&mut self, board: &Board);

    /// Turn a card face up or face down.
    fn flip(&mut self, card: CardRef, face_up: bool);

    /// Two cards were settled as a pair and stay face up.
    fn mark_matched(&mut self, first: CardRef, second: CardRef);

    /// Update the click counter.
    fn show_clicks(&mut self, clicks: u32);

    /// Replace the statistics text.
    fn show_stats(&mut self, text: &str);

    /// Remove any statistics text.
    fn clear_stats(&mut self) {
        self.show_stats("");
    }

    /// Every pair was found.
    fn announce_win(&mut self, clicks: u32);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn render_board(&mut self, board: &Board) {
        (**self).render_board(board);
    }

    fn flip(&mut self, card: CardRef, face_up: bool) {
        (**self).flip(card, face_up);
    }

    fn mark_matched(&mut self, first: CardRef, second: CardRef) {
        (**self).mark_matched(first, second);
    }

    fn show_clicks(&mut self, clicks: u32) {
        (**self).show_clicks(clicks);
    }

    fn show_stats(&mut self, text: &str) {
        (**self).show_stats(text);
    }

    fn clear_stats(&mut self) {
        (**self).clear_stats();
    }

    fn announce_win(&mut self, clicks: u32) {
        (**self).announce_win(clicks);
    }
}

/// One presenter call, as recorded by [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    BoardRendered { cards: usize },
    Flipped { card: CardRef, face_up: bool },
    Matched { first: CardRef, second: CardRef },
    Clicks(u32),
    Stats(String),
    StatsCleared,
    Won { clicks: u32 },
}

/// Presenter that records every call in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<PresenterEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    /// The statistics text currently shown, if any.
    #[must_use]
    pub fn stats_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Stats(text) => Some(Some(text.as_str())),
            PresenterEvent::StatsCleared => Some(None),
            _ => None,
        })?
    }

    /// Number of win announcements.
    #[must_use]
    pub fn wins(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Won { .. }))
            .count()
    }
}

impl Presenter for EventLog {
    fn render_board(&mut self, board: &Board) {
        self.events.push(PresenterEvent::BoardRendered { cards: board.len() });
    }

    fn flip(&mut self, card: CardRef, face_up: bool) {
        self.events.push(PresenterEvent::Flipped { card, face_up });
    }

    fn mark_matched(&mut self, first: CardRef, second: CardRef) {
        self.events.push(PresenterEvent::Matched { first, second });
    }

    fn show_clicks(&mut self, clicks: u32) {
        self.events.push(PresenterEvent::Clicks(clicks));
    }

    fn show_stats(&mut self, text: &str) {
        self.events.push(PresenterEvent::Stats(text.to_string()));
    }

    fn clear_stats(&mut self) {
        self.events.push(PresenterEvent::StatsCleared);
    }

    fn announce_win(&mut self, clicks: u32) {
        self.events.push(PresenterEvent::Won { clicks });
    }
}
