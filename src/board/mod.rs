//! Board generation.
//!
//! ## Key Types
//!
//! - `Card`: shape + color identity; equal cards form a pair
//! - `CardRef`: position of a card on the board
//! - `Board`: shuffled grid where every card appears exactly twice
//!
//! Boards are capped at [`MAX_PAIRS`] pairs (36 cards). Larger grids would
//! have to reuse shape/color combinations and break the pairing invariant,
//! so they are rejected as invalid dimensions.

pub mod card;
pub mod generator;

pub use card::{Card, CardRef, Color, Shape};
pub use generator::{canonical_pairs, check_dimensions, generate, Board, MAX_PAIRS};
