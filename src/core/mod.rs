//! Core engine types: RNG and configuration.
//!
//! Everything here is independent of how the game is presented or where
//! results are stored.

pub mod config;
pub mod rng;

pub use config::{Dimensions, GameConfig};
pub use rng::GameRng;
