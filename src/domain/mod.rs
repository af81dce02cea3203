//! Domain models for the InvoiceChain ledger
//!
//! Submission payloads, the immutable records built from them, and the typed
//! views over their nested inspection data.

mod submission;
mod types;

pub use submission::*;
pub use types::*;
