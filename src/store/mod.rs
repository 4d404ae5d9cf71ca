//! Result store: where finished games go.
//!
//! The engine only writes `GameResult`s and reads back `StoredRecord`s for the
//! average-clicks summary. How and where records live is up to the store.
//!
//! - `MemoryStore`: process-local, shared between clones
//! - `JsonlStore`: one JSON object per line in an append-only file

pub mod jsonl;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Dimensions;
use crate::error::StoreError;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

/// A completed game, as handed to the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub clicks: u32,
    /// Grid descriptor, e.g. `"3 x 4"`.
    pub dimensions: String,
    pub total_cards: usize,
    pub timestamp: DateTime<Utc>,
}

impl GameResult {
    /// Record a game finished now.
    #[must_use]
    pub fn new(clicks: u32, dimensions: Dimensions, total_cards: usize) -> Self {
        Self {
            clicks,
            dimensions: dimensions.to_string(),
            total_cards,
            timestamp: Utc::now(),
        }
    }
}

/// A record read back from a store.
///
/// Every field is optional: stores may hold records written by other tools or
/// damaged on disk. `clicks` is read as any JSON number, so `5.0` counts the
/// same as `5`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredRecord {
    pub clicks: Option<f64>,
    pub dimensions: Option<String>,
    pub total_cards: Option<usize>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl StoredRecord {
    /// A record carrying only a click count.
    #[must_use]
    pub fn with_clicks(clicks: u32) -> Self {
        Self {
            clicks: Some(f64::from(clicks)),
            ..Self::default()
        }
    }

    /// Click count, if present, finite and non-zero.
    #[must_use]
    pub fn usable_clicks(&self) -> Option<f64> {
        self.clicks.filter(|clicks| clicks.is_finite() && *clicks != 0.0)
    }
}

impl From<GameResult> for StoredRecord {
    fn from(result: GameResult) -> Self {
        Self {
            clicks: Some(f64::from(result.clicks)),
            dimensions: Some(result.dimensions),
            total_cards: Some(result.total_cards),
            timestamp: Some(result.timestamp),
        }
    }
}

/// Persistence backend for finished games.
///
/// Both calls are awaited by the caller. Failures are reported, never
/// retried by the engine.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Save one finished game.
    async fn persist(&self, result: &GameResult) -> Result<(), StoreError>;

    /// Read every saved record.
    async fn query_all(&self) -> Result<Vec<StoredRecord>, StoreError>;
}

#[async_trait]
impl<S: ResultStore + ?Sized> ResultStore for std::sync::Arc<S> {
    async fn persist(&self, result: &GameResult) -> Result<(), StoreError> {
        (**self).persist(result).await
    }

    async fn query_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        (**self).query_all().await
    }
}
