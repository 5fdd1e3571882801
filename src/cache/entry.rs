//! Cache Entry Module
//!
//! Defines the structure for individual cached image payloads.

use bytes::Bytes;
use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached image payload with bookkeeping metadata.
///
/// Entries have no expiry; they live until the store is cleared.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Raw image bytes
    pub data: Bytes,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry around a payload.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            created_at: current_timestamp_ms(),
        }
    }

    // == Cost ==
    /// Storage cost of this entry in bytes.
    pub fn cost(&self) -> usize {
        self.data.len()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
