//! Turn state machine.
//!
//! ```text
//! Idle -> AwaitingFirstFlip -> AwaitingSecondFlip -> Resolving -+-> AwaitingFirstFlip
//!                                                                +-> Won
//! ```
//!
//! `restart_game` returns any phase to `Idle` and immediately deals a new
//! board, landing in `AwaitingFirstFlip`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::presenter::Presenter;
use super::task::{Generation, ScheduledTask, TaskKind};
use crate::board::{self, Board, Card, CardRef};
use crate::core::{GameConfig, GameRng};
use crate::error::Result;
use crate::store::GameResult;

/// Where the session is in a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No board dealt yet.
    Idle,
    AwaitingFirstFlip,
    AwaitingSecondFlip,
    /// Two cards are up and waiting for the resolution task.
    Resolving,
    /// Every pair was found. Terminal until restart.
    Won,
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    InputDisabled,
    AlreadyFlipped,
    AlreadyMatched,
    OffBoard,
}

/// Result of [`GameSession::handle_card_select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed, no click counted.
    Ignored(Ignored),
    /// First card of the turn is up.
    Flipped,
    /// Second card is up. The task settles the pair once its delay passes.
    Resolving(ScheduledTask),
}

/// Result of [`GameSession::fire`].
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Task belonged to an earlier board or no longer applies.
    Stale,
    Matched { first: CardRef, second: CardRef },
    Mismatched { first: CardRef, second: CardRef },
    /// Last pair found. `result` is ready to persist and `announce` fires the
    /// win notification.
    Won {
        result: GameResult,
        announce: ScheduledTask,
    },
    Announced { clicks: u32 },
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    face_up: bool,
    matched: bool,
}

/// A single game: board, turn state, counters.
///
/// The session owns its presenter and reports visual changes to it as they
/// happen. Deferred steps are returned as [`ScheduledTask`]s.
pub struct GameSession<P> {
    config: GameConfig,
    rng: GameRng,
    presenter: P,
    board: Board,
    slots: Vec<Slot>,
    flipped: SmallVec<[CardRef; 2]>,
    matched_count: usize,
    click_count: u32,
    input_enabled: bool,
    phase: Phase,
    generation: Generation,
}

impl<P: Presenter> GameSession<P> {
    /// Deal the first board and wait for the first flip.
    ///
    /// Fails with `InvalidDimensions` if the configured grid cannot be paired;
    /// nothing is rendered in that case.
    pub fn new(config: GameConfig, presenter: P) -> Result<Self> {
        let mut rng = GameRng::from_seed_or_entropy(config.seed);
        let board = board::generate(config.dimensions, &mut rng)?;

        let mut session = Self {
            config,
            rng,
            presenter,
            board,
            slots: Vec::new(),
            flipped: SmallVec::new(),
            matched_count: 0,
            click_count: 0,
            input_enabled: true,
            phase: Phase::Idle,
            generation: Generation::default(),
        };
        session.deal();

        info!(
            dimensions = %session.config.dimensions,
            seed = session.rng.seed(),
            "game started"
        );
        Ok(session)
    }

    /// Select a card. See [`Selection`] for what can happen.
    pub fn handle_card_select(&mut self, card: CardRef) -> Selection {
        if let Some(reason) = self.ignore_reason(card) {
            debug!(%card, ?reason, "selection ignored");
            return Selection::Ignored(reason);
        }

        self.click_count += 1;
        self.presenter.show_clicks(self.click_count);

        self.slots[card.index()].face_up = true;
        self.presenter.flip(card, true);
        self.flipped.push(card);
        debug!(%card, clicks = self.click_count, "card flipped");

        if self.flipped.len() < 2 {
            self.phase = Phase::AwaitingSecondFlip;
            return Selection::Flipped;
        }

        let (first, second) = (self.flipped[0], self.flipped[1]);
        self.input_enabled = false;
        self.phase = Phase::Resolving;

        let matched = self.card(first).pairs_with(self.card(second));
        debug!(%first, %second, matched, "resolving pair");

        Selection::Resolving(ScheduledTask::resolve_pair(
            self.generation,
            self.config.resolve_delay(),
            first,
            second,
            matched,
        ))
    }

    /// Run a task whose delay has passed.
    pub fn fire(&mut self, task: ScheduledTask) -> Outcome {
        if task.generation != self.generation {
            debug!(
                task_generation = task.generation.0,
                generation = self.generation.0,
                "discarding stale task"
            );
            return Outcome::Stale;
        }

        match task.kind {
            TaskKind::ResolvePair {
                first,
                second,
                matched,
            } => self.resolve_pair(first, second, matched),
            TaskKind::AnnounceWin => {
                if self.phase != Phase::Won {
                    return Outcome::Stale;
                }
                info!(clicks = self.click_count, "announcing win");
                self.presenter.announce_win(self.click_count);
                Outcome::Announced {
                    clicks: self.click_count,
                }
            }
        }
    }

    /// Throw away the current game and deal a new board.
    ///
    /// Bumps the generation, so any task still pending from the old board is
    /// dropped when it fires.
    pub fn restart_game(&mut self) -> Result<()> {
        self.generation = self.generation.next();
        self.phase = Phase::Idle;
        self.flipped.clear();
        self.matched_count = 0;
        self.click_count = 0;
        self.input_enabled = true;
        self.presenter.clear_stats();

        self.board = board::generate(self.config.dimensions, &mut self.rng)?;
        self.deal();

        info!(generation = self.generation.0, "game restarted");
        Ok(())
    }

    /// Snapshot of the finished game for the result store.
    #[must_use]
    pub fn game_result(&self) -> GameResult {
        GameResult::new(self.click_count, self.config.dimensions, self.board.len())
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.board.total_pairs()
    }

    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Cards revealed this turn, in selection order.
    #[must_use]
    pub fn flipped(&self) -> &[CardRef] {
        &self.flipped
    }

    #[must_use]
    pub fn is_matched(&self, card: CardRef) -> bool {
        self.slots.get(card.index()).is_some_and(|slot| slot.matched)
    }

    #[must_use]
    pub fn is_face_up(&self, card: CardRef) -> bool {
        self.slots.get(card.index()).is_some_and(|slot| slot.face_up)
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // === Internals ===

    fn deal(&mut self) {
        self.slots = vec![Slot::default(); self.board.len()];
        self.presenter.render_board(&self.board);
        self.presenter.show_clicks(self.click_count);
        self.phase = Phase::AwaitingFirstFlip;
    }

    fn ignore_reason(&self, card: CardRef) -> Option<Ignored> {
        if !self.input_enabled {
            return Some(Ignored::InputDisabled);
        }
        let Some(slot) = self.slots.get(card.index()) else {
            return Some(Ignored::OffBoard);
        };
        if self.flipped.contains(&card) {
            Some(Ignored::AlreadyFlipped)
        } else if slot.matched {
            Some(Ignored::AlreadyMatched)
        } else {
            None
        }
    }

    fn card(&self, card: CardRef) -> &Card {
        &self.board.cards()[card.index()]
    }

    fn resolve_pair(&mut self, first: CardRef, second: CardRef, matched: bool) -> Outcome {
        if self.phase != Phase::Resolving || self.flipped.as_slice() != [first, second] {
            return Outcome::Stale;
        }

        for card in [first, second] {
            let slot = &mut self.slots[card.index()];
            if matched {
                slot.matched = true;
            } else {
                slot.face_up = false;
            }
        }

        let outcome = if matched {
            self.matched_count += 1;
            self.presenter.mark_matched(first, second);
            Outcome::Matched { first, second }
        } else {
            self.presenter.flip(first, false);
            self.presenter.flip(second, false);
            Outcome::Mismatched { first, second }
        };
        self.flipped.clear();

        if self.matched_count == self.total_pairs() {
            self.phase = Phase::Won;
            info!(clicks = self.click_count, "all pairs found");
            return Outcome::Won {
                result: self.game_result(),
                announce: ScheduledTask::announce_win(self.generation, self.config.win_delay()),
            };
        }

        self.input_enabled = true;
        self.phase = Phase::AwaitingFirstFlip;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dimensions;
    use crate::error::{DimensionsError, Error};
    use crate::session::presenter::{EventLog, PresenterEvent};

    fn session(rows: u32, cols: u32) -> GameSession<EventLog> {
        let config = GameConfig::new(Dimensions::new(rows, cols)).with_seed(42);
        GameSession::new(config, EventLog::new()).unwrap()
    }

    fn matching_pair<P: Presenter>(session: &GameSession<P>) -> (CardRef, CardRef) {
        let cards = session.board().cards();
        for i in 0..cards.len() {
            for j in (i + 1)..cards.len() {
                if cards[i] == cards[j] && !session.is_matched(CardRef(i)) {
                    return (CardRef(i), CardRef(j));
                }
            }
        }
        panic!("no unmatched pair left");
    }

    fn mismatched_pair<P: Presenter>(session: &GameSession<P>) -> (CardRef, CardRef) {
        let cards = session.board().cards();
        let j = (1..cards.len()).find(|&j| cards[j] != cards[0]).unwrap();
        (CardRef(0), CardRef(j))
    }

    fn expect_task(selection: Selection) -> ScheduledTask {
        match selection {
            Selection::Resolving(task) => task,
            other => panic!("expected a resolution task, got {other:?}"),
        }
    }

    #[test]
    fn test_new_session() {
        let s = session(3, 4);
        assert_eq!(s.phase(), Phase::AwaitingFirstFlip);
        assert_eq!(s.click_count(), 0);
        assert_eq!(s.matched_count(), 0);
        assert_eq!(s.total_pairs(), 6);
        assert!(s.input_enabled());
        assert!(s.flipped().is_empty());
        assert_eq!(
            s.presenter().events(),
            &[PresenterEvent::BoardRendered { cards: 12 }, PresenterEvent::Clicks(0)]
        );
    }

    #[test]
    fn test_new_session_rejects_odd_grid() {
        let config = GameConfig::new(Dimensions::new(3, 3));
        let err = GameSession::new(config, EventLog::new()).err().unwrap();
        assert!(matches!(
            err,
            Error::InvalidDimensions(DimensionsError::OddCellCount { .. })
        ));
    }

    #[test]
    fn test_first_select() {
        let mut s = session(3, 4);
        assert_eq!(s.handle_card_select(CardRef(5)), Selection::Flipped);

        assert_eq!(s.click_count(), 1);
        assert_eq!(s.flipped(), &[CardRef(5)]);
        assert!(s.is_face_up(CardRef(5)));
        assert_eq!(s.phase(), Phase::AwaitingSecondFlip);
    }

    #[test]
    fn test_same_card_twice_is_ignored() {
        let mut s = session(3, 4);
        s.handle_card_select(CardRef(1));
        assert_eq!(
            s.handle_card_select(CardRef(1)),
            Selection::Ignored(Ignored::AlreadyFlipped)
        );
        assert_eq!(s.click_count(), 1);
        assert_eq!(s.flipped().len(), 1);
    }

    #[test]
    fn test_off_board_is_ignored() {
        let mut s = session(2, 2);
        assert_eq!(
            s.handle_card_select(CardRef(4)),
            Selection::Ignored(Ignored::OffBoard)
        );
        assert_eq!(s.click_count(), 0);
    }

    #[test]
    fn test_input_disabled_while_resolving() {
        let mut s = session(3, 4);
        let (a, b) = mismatched_pair(&s);
        s.handle_card_select(a);
        let task = expect_task(s.handle_card_select(b));

        assert_eq!(s.phase(), Phase::Resolving);
        assert!(!s.input_enabled());
        assert_eq!(task.delay, s.config().resolve_delay());

        let other = (0..12).map(CardRef).find(|c| *c != a && *c != b).unwrap();
        assert_eq!(
            s.handle_card_select(other),
            Selection::Ignored(Ignored::InputDisabled)
        );
        assert_eq!(s.click_count(), 2);
    }

    #[test]
    fn test_matching_pair_resolves() {
        let mut s = session(3, 4);
        let (a, b) = matching_pair(&s);
        s.handle_card_select(a);
        let task = expect_task(s.handle_card_select(b));

        assert_eq!(s.fire(task), Outcome::Matched { first: a, second: b });
        assert_eq!(s.matched_count(), 1);
        assert!(s.is_matched(a) && s.is_matched(b));
        assert!(s.is_face_up(a) && s.is_face_up(b));
        assert!(s.flipped().is_empty());
        assert!(s.input_enabled());
        assert_eq!(s.phase(), Phase::AwaitingFirstFlip);

        assert_eq!(
            s.handle_card_select(a),
            Selection::Ignored(Ignored::AlreadyMatched)
        );
    }

    #[test]
    fn test_mismatched_pair_flips_back() {
        let mut s = session(3, 4);
        let (a, b) = mismatched_pair(&s);
        s.handle_card_select(a);
        let task = expect_task(s.handle_card_select(b));

        assert_eq!(s.fire(task), Outcome::Mismatched { first: a, second: b });
        assert_eq!(s.matched_count(), 0);
        assert!(!s.is_face_up(a) && !s.is_face_up(b));
        assert!(s.input_enabled());

        let events = s.presenter().events();
        assert_eq!(
            &events[events.len() - 2..],
            &[
                PresenterEvent::Flipped { card: a, face_up: false },
                PresenterEvent::Flipped { card: b, face_up: false },
            ]
        );
    }

    #[test]
    fn test_task_fires_once() {
        let mut s = session(3, 4);
        let (a, b) = matching_pair(&s);
        s.handle_card_select(a);
        let task = expect_task(s.handle_card_select(b));

        s.fire(task);
        assert_eq!(s.fire(task), Outcome::Stale);
        assert_eq!(s.matched_count(), 1);
    }

    #[test]
    fn test_two_by_two_win() {
        let mut s = session(2, 2);

        let mut outcome = Outcome::Stale;
        while !s.is_won() {
            let (a, b) = matching_pair(&s);
            s.handle_card_select(a);
            let task = expect_task(s.handle_card_select(b));
            outcome = s.fire(task);
        }

        let Outcome::Won { result, announce } = outcome else {
            panic!("expected a win, got {outcome:?}");
        };
        assert_eq!(result.clicks, 4);
        assert_eq!(result.total_cards, 4);
        assert_eq!(result.dimensions, "2 x 2");
        assert_eq!(announce.delay, s.config().win_delay());
        assert!(!s.input_enabled());
        assert_eq!(s.matched_count(), s.total_pairs());

        assert_eq!(s.fire(announce), Outcome::Announced { clicks: 4 });
        assert_eq!(s.presenter().wins(), 1);
    }

    #[test]
    fn test_restart_mid_resolution_drops_stale_task() {
        let mut s = session(3, 4);
        let (a, b) = matching_pair(&s);
        s.handle_card_select(a);
        let task = expect_task(s.handle_card_select(b));

        s.restart_game().unwrap();
        assert_eq!(s.generation(), Generation(1));
        assert_eq!(s.click_count(), 0);
        assert_eq!(s.matched_count(), 0);
        assert!(s.input_enabled());
        assert!(s.flipped().is_empty());
        assert_eq!(s.phase(), Phase::AwaitingFirstFlip);

        assert_eq!(s.fire(task), Outcome::Stale);
        assert_eq!(s.matched_count(), 0);
        assert!(s.input_enabled());
        assert!(!s.is_matched(a));
    }

    #[test]
    fn test_restart_after_win() {
        let mut s = session(2, 2);
        while !s.is_won() {
            let (a, b) = matching_pair(&s);
            s.handle_card_select(a);
            let task = expect_task(s.handle_card_select(b));
            s.fire(task);
        }

        s.restart_game().unwrap();
        assert!(!s.is_won());
        assert_eq!(s.click_count(), 0);
        assert_eq!(s.matched_count(), 0);
        assert!((0..4).all(|i| !s.is_matched(CardRef(i)) && !s.is_face_up(CardRef(i))));
        assert_eq!(
            s.presenter().events().iter().rev().take(3).collect::<Vec<_>>(),
            vec![
                &PresenterEvent::Clicks(0),
                &PresenterEvent::BoardRendered { cards: 4 },
                &PresenterEvent::StatsCleared,
            ]
        );
    }

    #[test]
    fn test_announce_before_win_is_stale() {
        let mut s = session(2, 2);
        let task = ScheduledTask::announce_win(s.generation(), s.config().win_delay());
        assert_eq!(s.fire(task), Outcome::Stale);
        assert_eq!(s.presenter().wins(), 0);
    }
}
