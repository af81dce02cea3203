//! Shared request and response types for REST API handlers.

use serde::{Deserialize, Serialize};

use crate::domain::SubmissionRecord;

/// Acknowledgement message for an accepted submission.
pub const SUBMITTED_MESSAGE: &str = "Inspection submitted";

/// Response for `POST /inspection/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInspectionResponse {
    pub message: String,
    pub inspection: SubmissionRecord,
}

impl CreateInspectionResponse {
    pub fn submitted(inspection: SubmissionRecord) -> Self {
        Self {
            message: SUBMITTED_MESSAGE.to_string(),
            inspection,
        }
    }
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// Records currently held by the store
    pub records: usize,
}
