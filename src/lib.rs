//! # memory-match
//!
//! Engine for a card-matching memory game: a grid of face-down cards, two
//! reveals per turn, matches stay up, the game ends when every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Deterministic core**: Board generation and the turn state machine are
//!    synchronous and seedable. Nothing in `board` or `session` sleeps or
//!    performs I/O.
//!
//! 2. **Explicit time**: Delayed steps (pair resolution, win announcement)
//!    come back as `ScheduledTask`s tagged with a generation, so a restart can
//!    never be corrupted by a timer from the previous board.
//!
//! 3. **Collaborators behind traits**: Rendering goes through `Presenter`,
//!    persistence through `ResultStore`.
//!
//! ## Modules
//!
//! - `core`: Configuration and RNG
//! - `board`: Cards and board generation
//! - `session`: Turn state machine and presentation trait
//! - `store`: Result store trait and implementations
//! - `stats`: Average-clicks summary
//! - `runtime`: Async controller, timers, event loop
//!
//! ## Example
//!
//! ```
//! use memory_match::{Dimensions, EventLog, GameConfig, GameSession, Phase};
//!
//! let config = GameConfig::new(Dimensions::new(2, 2)).with_seed(1);
//! let session = GameSession::new(config, EventLog::new()).unwrap();
//!
//! assert_eq!(session.phase(), Phase::AwaitingFirstFlip);
//! assert_eq!(session.total_pairs(), 2);
//! ```

pub mod board;
pub mod core;
pub mod error;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Dimensions, GameConfig, GameRng};

pub use crate::board::{generate, Board, Card, CardRef, Color, Shape, MAX_PAIRS};

pub use crate::error::{DimensionsError, Error, Result, StoreError};

pub use crate::session::{
    EventLog, GameSession, Generation, Ignored, Outcome, Phase, Presenter, PresenterEvent,
    ScheduledTask, Selection, TaskKind,
};

pub use crate::store::{GameResult, JsonlStore, MemoryStore, ResultStore, StoredRecord};

pub use crate::stats::AverageClicks;

pub use crate::runtime::{GameController, TimerQueue, UiEvent};
