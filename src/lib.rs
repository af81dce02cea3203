//! InvoiceChain Ledger Library
//!
//! Intake service for InvoiceChain inspection and invoice-proof submissions:
//! validates payloads, fingerprints them with a canonical SHA-256 integrity
//! hash and keeps them in an append-only store.
//!
//! ## Modules
//!
//! - [`domain`] - Submission payloads and records
//! - [`crypto`] - Canonical JSON hashing
//! - [`infra`] - Validation, storage and the submission service
//! - [`api`] - REST routes and error mapping
//! - [`server`] - Configuration and HTTP bootstrap
//! - [`telemetry`] - Logging setup

pub mod api;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod server;
pub mod telemetry;

// Re-export commonly used types
pub use domain::{
    InspectionResult, SensorReadings, SubmissionId, SubmissionPayload, SubmissionRecord,
    SubmissionStage, VerificationReport,
};

pub use infra::{
    InMemorySubmissionStore, InspectionService, PayloadValidator, Result, SubmissionError,
    SubmissionStore, ValidationRules,
};
