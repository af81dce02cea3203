//! Submission identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::domain::SubmissionId;

use super::{Result, SubmissionError};

/// Issues `PREFIX-<unix-millis>-<counter>` identifiers.
///
/// The millisecond component keeps ids readable and roughly time-ordered;
/// the process-wide counter makes them unique even when several submissions
/// land in the same millisecond.
#[derive(Debug)]
pub struct SubmissionIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SubmissionIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(SubmissionError::Configuration(
                "submission id prefix must not be empty".to_string(),
            ));
        }
        if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(SubmissionError::Configuration(format!(
                "submission id prefix must be ASCII alphanumeric: {prefix:?}"
            )));
        }

        Ok(Self {
            prefix: prefix.to_string(),
            counter: AtomicU64::new(0),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Issue the next identifier for a submission accepted at `at`.
    pub fn next_id(&self, at: DateTime<Utc>) -> SubmissionId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        SubmissionId(format!("{}-{}-{}", self.prefix, at.timestamp_millis(), seq))
    }
}
