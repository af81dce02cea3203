//! API layer for the InvoiceChain ledger
//!
//! REST endpoints for submitting and reading inspection records.

pub mod error;
pub mod handlers;
mod rest;
pub mod types;

pub use error::{ApiError, ErrorBody, ErrorCode};
pub use rest::*;
