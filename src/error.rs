//! Error types for the Keva output-cache adapter

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Cache adapter error types
///
/// "Key not found" is never an error: fetch operations return `Ok(None)` for
/// absent or expired keys. Every variant here is a genuine failure the caller
/// must handle.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Transport-level failure talking to the store
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload present but unreadable, or not matching the requested shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint URL rejected at configuration time
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The store answered but reported the command failed
    #[error("server error: {0}")]
    Server(String),

    /// Envelope arrived but its payload violates the protocol shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected before any remote call (empty key/prefix, bad config)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
