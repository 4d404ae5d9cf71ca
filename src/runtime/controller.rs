//! Async driver around a `GameSession`.
//!
//! The controller turns scheduled tasks into real timers, talks to the result
//! store, and runs the single-threaded event loop that front ends feed with
//! [`UiEvent`]s.

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{info, instrument, warn};

use super::timers::TimerQueue;
use crate::board::CardRef;
use crate::core::GameConfig;
use crate::error::{Error, Result};
use crate::session::{GameSession, Outcome, Presenter, ScheduledTask, Selection};
use crate::stats::{AverageClicks, CALCULATING_TEXT, QUERY_FAILED_TEXT};
use crate::store::{GameResult, ResultStore};

/// Input from the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Select(CardRef),
    ShowStats,
    Restart,
    Quit,
}

/// Owns a session, its result store, and its pending timers.
pub struct GameController<P, S> {
    session: GameSession<P>,
    store: S,
    timers: TimerQueue,
}

impl<P: Presenter, S: ResultStore> GameController<P, S> {
    /// Start a game. Fails if the configured board cannot be built.
    pub fn new(config: GameConfig, presenter: P, store: S) -> Result<Self> {
        Ok(Self {
            session: GameSession::new(config, presenter)?,
            store,
            timers: TimerQueue::new(),
        })
    }

    #[must_use]
    pub fn session(&self) -> &GameSession<P> {
        &self.session
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        self.session.presenter_mut()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of timers still waiting, stale ones included.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Forward a selection to the session and arm the resolution timer.
    pub fn handle_card_select(&mut self, card: CardRef) -> Selection {
        let selection = self.session.handle_card_select(card);
        if let Selection::Resolving(task) = selection {
            self.timers.schedule(task);
        }
        selection
    }

    /// Deal a fresh board. Pending timers stay queued and are dropped as
    /// stale when they fire.
    pub fn restart_game(&mut self) -> Result<()> {
        self.session.restart_game()
    }

    /// Persist the result, then arm the win announcement.
    ///
    /// A store failure is logged and otherwise ignored: the player still gets
    /// their announcement.
    #[instrument(skip_all, fields(clicks = result.clicks))]
    pub async fn game_won(&mut self, result: GameResult, announce: ScheduledTask) {
        match self.store.persist(&result).await {
            Ok(()) => info!(dimensions = %result.dimensions, "game result saved"),
            Err(err) => {
                let err = Error::Persistence(err);
                warn!(error = %err, "continuing without saving the result");
            }
        }
        self.timers.schedule(announce);
    }

    /// Query the store and show the average-clicks summary.
    ///
    /// Read-only: session state is not touched.
    #[instrument(skip_all)]
    pub async fn request_average_stats(&mut self) {
        self.session.presenter_mut().show_stats(CALCULATING_TEXT);

        let text = match self.store.query_all().await {
            Ok(records) => {
                let summary = AverageClicks::from_records(&records);
                info!(records = records.len(), %summary, "statistics computed");
                summary.to_string()
            }
            Err(err) => {
                let err = Error::Query(err);
                warn!(error = %err, "statistics unavailable");
                QUERY_FAILED_TEXT.to_string()
            }
        };
        self.session.presenter_mut().show_stats(&text);
    }

    /// Fire every task whose deadline has passed.
    pub async fn run_due(&mut self) {
        let now = Instant::now();
        while let Some(task) = self.timers.pop_due(now) {
            self.fire(task).await;
        }
    }

    /// Sleep until the next timer and fire what is due.
    ///
    /// Returns `false` if nothing was pending.
    pub async fn advance(&mut self) -> bool {
        let Some(deadline) = self.timers.next_deadline() else {
            return false;
        };
        time::sleep_until(deadline).await;
        self.run_due().await;
        true
    }

    /// Keep advancing until no timers remain.
    pub async fn settle(&mut self) {
        while self.advance().await {}
    }

    /// Apply one front-end event. Returns `false` on [`UiEvent::Quit`].
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<bool> {
        match event {
            UiEvent::Select(card) => {
                self.handle_card_select(card);
            }
            UiEvent::ShowStats => self.request_average_stats().await,
            UiEvent::Restart => self.restart_game()?,
            UiEvent::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Event loop: front-end events and timers, one at a time, until the
    /// channel closes or `Quit` arrives.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UiEvent>) -> Result<()> {
        loop {
            let deadline = self.timers.next_deadline();
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if !self.dispatch(event).await? {
                        break;
                    }
                }
                () = wait_until(deadline) => self.run_due().await,
            }
        }
        Ok(())
    }

    async fn fire(&mut self, task: ScheduledTask) {
        if let Outcome::Won { result, announce } = self.session.fire(task) {
            self.game_won(result, announce).await;
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
