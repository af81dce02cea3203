//! Trait definitions for the ledger's storage seam

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::SubmissionRecord;

use super::Result;

/// Append-only storage for accepted submissions.
///
/// Invariant: records are only ever appended; nothing is updated or removed.
/// Implementations must make `append` atomic with respect to readers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Append a fully composed record and hand it back
    ///
    /// The store assigns nothing itself and never rejects a well-formed record.
    async fn append(&self, record: SubmissionRecord) -> Result<SubmissionRecord>;

    /// Snapshot of every record in acceptance order
    async fn list_all(&self) -> Result<Vec<SubmissionRecord>>;

    /// Read a record by id
    async fn get(&self, id: &str) -> Result<Option<SubmissionRecord>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}
