//! Error types for the InvoiceChain ledger

use thiserror::Error;

/// Errors that can occur while accepting or reading submissions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Required field absent, null or blank
    #[error("Missing required data")]
    MissingField(String),

    /// Field present with the wrong shape or a non-numeric value
    #[error("{message}")]
    InvalidField { field: String, message: String },

    /// Body is not a JSON object or cannot be decoded into a payload
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    /// Submission not found
    #[error("Inspection not found: {0}")]
    NotFound(String),

    /// Canonical JSON encoding failed
    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl SubmissionError {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Offending field path, when the error concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField(field) | Self::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, SubmissionError>;
