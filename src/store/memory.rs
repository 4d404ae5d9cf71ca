//! In-memory result store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{GameResult, ResultStore, StoredRecord};
use crate::error::StoreError;

/// Process-local store. Clones share the same records.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<StoredRecord>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = StoredRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records.into_iter().collect())),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn persist(&self, result: &GameResult) -> Result<(), StoreError> {
        self.records.lock().await.push(result.clone().into());
        Ok(())
    }

    async fn query_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.records.lock().await.clone())
    }
}
