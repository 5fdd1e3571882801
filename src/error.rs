//! Error types for the catalog core
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the image cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Attempted to store an empty payload
    #[error("Invalid payload: empty data for key '{0}'")]
    InvalidPayload(String),

    /// Cache is at capacity and the key has not been admitted before
    #[error("Capacity exceeded: cache already holds {limit} entries")]
    CapacityExceeded {
        /// Configured distinct-key limit
        limit: usize,
    },

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Cache clear failed
    #[error("Clear failed: {0}")]
    ClearFailed(String),
}

// == Fetch Error Enum ==
/// Recognized transport error taxonomy.
///
/// Each variant maps to a fixed human-readable message surfaced through the
/// controller's error state. Transport failures outside this taxonomy stay
/// opaque (`anyhow::Error`) and never reach the view state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The endpoint or download target could not be turned into a URL
    #[error("Invalid URL Error Check Your URL")]
    InvalidUrl,

    /// The response was not shaped like an HTTP response
    #[error("Invalid Response Check Your Request")]
    InvalidResponse,

    /// Non-2xx status code
    #[error("Failed Response With StatusCode:{status_code}")]
    FailedResponse {
        /// HTTP status code of the failed response
        status_code: u16,
    },

    /// 429 Too Many Requests
    #[error("Rate Limit Exceeded You Can Try Again In 1-2 hours")]
    RateLimitExceeded,

    /// Body did not decode into the expected envelope
    #[error("Decode Failed With DecodeError: {0}")]
    DecodeFailed(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
