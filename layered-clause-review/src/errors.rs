//! Error types for clause review.
//!
//! Only configuration loading and serialization surface errors to callers.
//! `MalformedSegment` and `CacheUnavailable` are recovered internally and
//! logged; they exist as values so the log lines carry a uniform message.

use thiserror::Error;

/// Errors that can occur while configuring or reporting an analysis.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Configuration file could not be read or parsed.
    #[error("invalid configuration: {path}: {message}")]
    Config { path: String, message: String },

    /// A relator segment had no preceding phrase to attach to.
    #[error("relator segment {index} has no preceding phrase")]
    MalformedSegment { index: usize },

    /// The result cache could not be used; the analysis is recomputed.
    #[error("result cache unavailable: {reason}")]
    CacheUnavailable { reason: String },

    /// Serializing an analysis result failed.
    #[error("failed to serialize analysis: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;
