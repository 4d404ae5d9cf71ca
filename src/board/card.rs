//! Card identities and board positions.
//!
//! A `Card` is a plain value: two cards are the same pair iff their shape
//! and color match, regardless of where they sit on the board.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumString};

/// Shape printed on a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum::Display, EnumString, EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    /// All shapes in pairing order.
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];
}

/// Color of the shape on a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum::Display, EnumString, EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    /// All colors in pairing order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];
}

/// Immutable card identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub shape: Shape,
    pub color: Color,
}

impl Card {
    #[must_use]
    pub const fn new(shape: Shape, color: Color) -> Self {
        Self { shape, color }
    }

    /// Check whether two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self == other
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.shape)
    }
}

/// Position of a card on the board, row-major from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardRef(pub usize);

impl CardRef {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Reference to the card at `row`, `col` on a grid `cols` wide.
    #[must_use]
    pub const fn at(row: usize, col: usize, cols: usize) -> Self {
        Self(row * cols + col)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
