//! In-memory submission store.
//!
//! Process-lifetime only: records vanish when the process exits. A single
//! `RwLock` serializes appends while letting readers snapshot concurrently.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::SubmissionRecord;

use super::{Result, SubmissionStore};

/// Append-only `Vec` of records guarded by a reader/writer lock.
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    records: RwLock<Vec<SubmissionRecord>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn append(&self, record: SubmissionRecord) -> Result<SubmissionRecord> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<SubmissionRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<SubmissionRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id.as_str() == id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
