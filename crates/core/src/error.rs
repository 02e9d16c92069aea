//! Error types for the Recollect domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Store failures are
//! deliberately coarse: the retrieval engine never surfaces them to the
//! caller — a failing source contributes zero fragments and the call
//! degrades gracefully.

use thiserror::Error;

/// Errors from the store layer (facts file, conversation archive,
/// state log, recent-turn window).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Backing file grew past the hard read ceiling. The whole file is
    /// skipped rather than partially parsed, so a truncated slice is
    /// never presented as complete.
    #[error("{path} is {size} bytes, over the {limit}-byte read ceiling")]
    Oversized { path: String, size: u64, limit: u64 },

    #[error("Malformed record in {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl StoreError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
