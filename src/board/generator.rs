//! Board generation: canonical pairs plus an unbiased shuffle.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardRef, Color, Shape};
use crate::core::{Dimensions, GameRng};
use crate::error::DimensionsError;

/// Number of distinct cards the palette can produce.
pub const MAX_PAIRS: usize = Shape::ALL.len() * Color::ALL.len();

/// Shuffled, fully paired grid of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    dimensions: Dimensions,
    cards: Vec<Card>,
}

impl Board {
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs to find.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get the card at a position.
    #[must_use]
    pub fn get(&self, card: CardRef) -> Option<&Card> {
        self.cards.get(card.index())
    }

    /// All cards in row-major order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate positions with their cards.
    pub fn iter(&self) -> impl Iterator<Item = (CardRef, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| (CardRef::new(index), card))
    }

    /// Cards laid out row by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Card]> {
        self.cards.chunks(self.dimensions.cols.max(1) as usize)
    }

    /// How many times each distinct card occurs.
    #[must_use]
    pub fn pair_counts(&self) -> FxHashMap<Card, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(*card).or_insert(0) += 1;
        }
        counts
    }
}

/// Check that a board of the given size can be built.
///
/// Returns the number of pairs it will hold.
pub fn check_dimensions(dimensions: Dimensions) -> Result<usize, DimensionsError> {
    let Dimensions { rows, cols } = dimensions;
    if rows == 0 || cols == 0 {
        return Err(DimensionsError::NonPositive {
            rows: i64::from(rows),
            cols: i64::from(cols),
        });
    }

    let cells = dimensions.cell_count();
    if cells % 2 != 0 {
        return Err(DimensionsError::OddCellCount { rows, cols });
    }

    let pairs = cells / 2;
    if pairs > MAX_PAIRS {
        return Err(DimensionsError::TooManyPairs {
            pairs,
            max: MAX_PAIRS,
        });
    }

    Ok(pairs)
}

/// One card of each pair, in the fixed pairing order.
///
/// Shape varies fastest, color slowest: circle/red, square/red,
/// triangle/red, circle/blue, ...
#[must_use]
pub fn canonical_pairs(pairs: usize) -> Vec<Card> {
    (0..pairs)
        .map(|i| {
            let shape = Shape::ALL[i % Shape::ALL.len()];
            let color = Color::ALL[(i / Shape::ALL.len()) % Color::ALL.len()];
            Card::new(shape, color)
        })
        .collect()
}

/// Build a shuffled board with every card appearing exactly twice.
///
/// Fails without building anything when the dimensions are zero, give an
/// odd card count, or need more than [`MAX_PAIRS`] pairs.
pub fn generate(dimensions: Dimensions, rng: &mut GameRng) -> Result<Board, DimensionsError> {
    let pairs = check_dimensions(dimensions)?;

    let mut cards: Vec<Card> = canonical_pairs(pairs)
        .into_iter()
        .flat_map(|card| [card, card])
        .collect();
    rng.shuffle(&mut cards);

    Ok(Board { dimensions, cards })
}
