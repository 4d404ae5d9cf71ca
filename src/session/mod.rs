//! Game session: turn state, click counting, match resolution, win detection.
//!
//! ## Key Types
//!
//! - `GameSession`: the state machine for one player at one board
//! - `Presenter`: receives visual updates (flips, counters, stats text)
//! - `ScheduledTask`: a deferred step (pair resolution, win announcement)
//!
//! The session is synchronous. Timing and result persistence are driven from
//! outside, see [`crate::runtime::GameController`].

pub mod presenter;
pub mod state;
pub mod task;

pub use presenter::{EventLog, Presenter, PresenterEvent};
pub use state::{GameSession, Ignored, Outcome, Phase, Selection};
pub use task::{Generation, ScheduledTask, TaskKind};
