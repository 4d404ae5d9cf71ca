//! Append-only JSON-lines result store.
//!
//! Each finished game is one line:
//!
//! ```text
//! {"clicks":14,"dimensions":"3 x 4","totalCards":12,"timestamp":"2026-10-16T09:30:00Z"}
//! ```
//!
//! A missing file reads as an empty store. Lines that do not decode are kept
//! as records without a click count, so they still count as "present" for
//! the statistics summary.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use super::{GameResult, ResultStore, StoredRecord};
use crate::error::StoreError;

/// File-backed store.
#[derive(Clone, Debug)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultStore for JsonlStore {
    async fn persist(&self, result: &GameResult) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(result)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn query_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let records: Vec<StoredRecord> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).unwrap_or_else(|err| {
                    warn!(
                        path = %self.path.display(),
                        line = index + 1,
                        error = %err,
                        "undecodable result record"
                    );
                    StoredRecord::default()
                })
            })
            .collect();
        Ok(records)
    }
}
