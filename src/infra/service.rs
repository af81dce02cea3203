//! Submission service: the single write path into the ledger.
//!
//! ```text
//! Received -> Validated -> Hashed -> Appended -> Acknowledged
//!     \
//!      -> Rejected (no store mutation)
//! ```

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::domain::{SubmissionPayload, SubmissionRecord, SubmissionStage, VerificationReport};

use super::{
    PayloadValidator, Result, SubmissionError, SubmissionIdGenerator, SubmissionStore,
};

/// Orchestrates validation, hashing and append for every submission.
///
/// Transport adapters (the `/inspection` and `/api/inspection` routes) hold
/// one shared instance; none of them touch the store directly.
///
/// Id and timestamp assignment happen under `append_lock` together with the
/// append, so ids and timestamps follow acceptance order in `list_all`.
pub struct InspectionService {
    store: Arc<dyn SubmissionStore>,
    validator: PayloadValidator,
    ids: SubmissionIdGenerator,
    append_lock: Mutex<()>,
}

impl InspectionService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        validator: PayloadValidator,
        ids: SubmissionIdGenerator,
    ) -> Self {
        Self {
            store,
            validator,
            ids,
            append_lock: Mutex::new(()),
        }
    }

    /// Accept a raw submission.
    ///
    /// On any validation failure the store is left untouched. The integrity
    /// hash is always recomputed here; a client-supplied `integrityHash` is
    /// ignored.
    #[instrument(skip_all)]
    pub async fn create(&self, raw: serde_json::Value) -> Result<SubmissionRecord> {
        debug!(stage = %SubmissionStage::Received, "submission received");

        if let Err(err) = self.validator.validate(&raw) {
            warn!(
                stage = %SubmissionStage::Rejected,
                field = err.field().unwrap_or("-"),
                reason = %err,
                "submission rejected"
            );
            return Err(err);
        }
        let resolved = self.validator.resolve_aliases(raw);
        let payload = SubmissionPayload::from_value(resolved).map_err(|err| {
            warn!(stage = %SubmissionStage::Rejected, reason = %err, "submission rejected");
            err
        })?;
        debug!(stage = %SubmissionStage::Validated, submitter = %payload.submitter_id);

        let integrity_hash = payload.integrity_hash()?;
        debug!(stage = %SubmissionStage::Hashed, %integrity_hash);

        let attachments = payload
            .inspection_result()
            .map(|r| r.attachment_count())
            .unwrap_or(0);

        let record = {
            let _sequencing = self.append_lock.lock().await;
            let timestamp = Utc::now().trunc_subsecs(3);
            let id = self.ids.next_id(timestamp);
            self.store
                .append(SubmissionRecord::new(id, payload, timestamp, integrity_hash))
                .await?
        };
        debug!(stage = %SubmissionStage::Appended, id = %record.id);

        info!(
            stage = %SubmissionStage::Acknowledged,
            id = %record.id,
            site = %record.payload.site_id,
            attachments,
            integrity_hash = %record.integrity_hash,
            "inspection submitted"
        );
        Ok(record)
    }

    /// Every accepted record in acceptance order.
    pub async fn list_all(&self) -> Result<Vec<SubmissionRecord>> {
        self.store.list_all().await
    }

    /// A single record by id.
    pub async fn get(&self, id: &str) -> Result<SubmissionRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| SubmissionError::NotFound(id.to_string()))
    }

    /// Re-hash a stored record's payload and compare with its stored hash.
    pub async fn verify(&self, id: &str) -> Result<VerificationReport> {
        let report = self.get(id).await?.verify()?;
        if !report.valid {
            warn!(id, stored = %report.integrity_hash, recomputed = %report.recomputed_hash, "integrity hash mismatch");
        }
        Ok(report)
    }

    /// Number of accepted records.
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }
}
