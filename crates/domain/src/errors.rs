//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for GraphFeed
///
/// Every variant aborts the call that produced it; nothing is swallowed or
/// logged-and-continued below the caller.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GraphFeedError {
    /// Transport-level failure: connection, timeout, or a non-auth HTTP
    /// error status. Propagated verbatim, never retried internally.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint rejected the bearer credential (401/403) or no token
    /// could be obtained.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A response violated the endpoint contract: the `value` array is
    /// missing, the body is not decodable, or a continuation cursor is
    /// present but does not parse as a URL.
    #[error("Malformed page: {0}")]
    MalformedPage(String),

    /// A single record failed a required derivation. Carries the offending
    /// raw record so callers can surface it for diagnostics.
    #[error("Normalization error: {reason}")]
    Normalization {
        /// What failed to derive.
        reason: String,
        /// The raw record as received from the endpoint.
        record: serde_json::Value,
    },

    /// A caller-supplied value violated a precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for GraphFeed operations
pub type Result<T> = std::result::Result<T, GraphFeedError>;
