//! Average-clicks summary over stored game records.

use crate::store::StoredRecord;

/// Shown while the store is being queried.
pub const CALCULATING_TEXT: &str = "Calculating...";

/// Shown when the store could not be read.
pub const QUERY_FAILED_TEXT: &str = "Error loading statistics";

/// Summary of every stored game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AverageClicks {
    /// The store holds no records at all.
    NoGames,
    /// Records exist but none carries a usable click count.
    NoValidData,
    Average { average: f64, games: usize },
}

impl AverageClicks {
    /// Summarize records. Only records with a usable click count are averaged.
    #[must_use]
    pub fn from_records(records: &[StoredRecord]) -> Self {
        if records.is_empty() {
            return AverageClicks::NoGames;
        }

        let (total, games) = records
            .iter()
            .filter_map(StoredRecord::usable_clicks)
            .fold((0.0, 0usize), |(total, games), clicks| {
                (total + clicks, games + 1)
            });

        if games == 0 {
            return AverageClicks::NoValidData;
        }

        AverageClicks::Average {
            average: total / games as f64,
            games,
        }
    }
}

impl std::fmt::Display for AverageClicks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AverageClicks::NoGames => write!(f, "No games played yet"),
            AverageClicks::NoValidData => write!(f, "No valid game data found"),
            AverageClicks::Average { average, games } => {
                // Ties round up, so 2.125 shows as 2.13.
                let rounded = (average * 100.0).round() / 100.0;
                write!(f, "Average clicks: {rounded:.2} (from {games} games)")
            }
        }
    }
}
