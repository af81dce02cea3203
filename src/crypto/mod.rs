//! Cryptographic utilities for the InvoiceChain ledger
//!
//! Provides canonical JSON hashing (RFC 8785 + SHA-256) used for submission
//! integrity fingerprints.

mod hash;

pub use hash::*;
