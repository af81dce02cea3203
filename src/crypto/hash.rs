//! Deterministic content hashing for submission payloads
//!
//! Integrity hashes are computed over the RFC 8785 (JCS) canonical form of a
//! JSON value, so the digest depends only on content and never on the order
//! in which a client inserted keys:
//! - Keys sorted lexicographically (UTF-16 code units per JCS)
//! - No insignificant whitespace
//! - ES6 number formatting (`22` and `22.0` canonicalize identically)
//!
//! Canonicalization is delegated to `serde_json_canonicalizer`.

use sha2::{Digest, Sha256};

use crate::infra::{Result, SubmissionError};

/// 32-byte SHA-256 hash
pub type Hash256 = [u8; 32];

/// Length of a hex-rendered [`Hash256`].
pub const HASH_HEX_LEN: usize = 64;

/// Compute SHA-256 hash of arbitrary bytes
pub fn sha256(data: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Convert a JSON value to its RFC 8785 canonical string.
///
/// Values parsed from JSON text always canonicalize; the error path only
/// exists for values built in code that hold non-finite floats.
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String> {
    serde_json_canonicalizer::to_string(value)
        .map_err(|e| SubmissionError::Canonicalization(e.to_string()))
}

/// SHA-256 over the canonical JSON encoding of `value`.
pub fn canonical_json_hash(value: &serde_json::Value) -> Result<Hash256> {
    let canonical = canonicalize_json(value)?;
    Ok(sha256(canonical.as_bytes()))
}

/// Lowercase hex SHA-256 over the canonical JSON encoding of `value`.
///
/// This is the `integrityHash` carried by every submission record. A client
/// that canonicalizes the same payload with JCS and digests it with SHA-256
/// arrives at the same string.
pub fn integrity_hash(value: &serde_json::Value) -> Result<String> {
    canonical_json_hash(value).map(hex::encode)
}

/// Recompute the integrity hash of `value` and compare it with `expected`.
///
/// Hex comparison is case-insensitive; anything that is not 64 hex chars
/// never matches.
pub fn verify_integrity_hash(value: &serde_json::Value, expected: &str) -> Result<bool> {
    let actual = integrity_hash(value)?;
    Ok(integrity_hashes_match(&actual, expected))
}

/// Compare a freshly computed integrity hash with a stored or supplied one.
pub fn integrity_hashes_match(actual: &str, expected: &str) -> bool {
    let expected = expected.trim();
    expected.len() == HASH_HEX_LEN
        && expected.bytes().all(|b| b.is_ascii_hexdigit())
        && actual.eq_ignore_ascii_case(expected)
}
