//! Async runtime: timers, result store calls, and the event loop.
//!
//! Everything runs on one task. Store calls are awaited in place; front-end
//! events that arrive meanwhile wait in the channel.

pub mod controller;
pub mod timers;

pub use controller::{GameController, UiEvent};
pub use timers::TimerQueue;
