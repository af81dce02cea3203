//! Infrastructure layer for the InvoiceChain ledger
//!
//! Contains:
//! - Error types
//! - The `SubmissionStore` trait and its in-memory implementation
//! - Payload validation rules
//! - Submission id generation
//! - The submission service that ties them together

mod error;
mod id;
mod memory;
mod service;
mod traits;
mod validation;

pub use error::*;
pub use id::SubmissionIdGenerator;
pub use memory::InMemorySubmissionStore;
pub use service::InspectionService;
pub use traits::*;
pub use validation::{FieldSpec, PayloadValidator, ValidationRules};
