//! Cache Module
//!
//! In-memory image cache bounded by admission control: once the distinct-key
//! limit is reached, inserts of new keys are rejected rather than evicting
//! old entries. Overwrites of admitted keys always succeed.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

use std::sync::Arc;
use tokio::sync::RwLock;

// == Public Constants ==
/// Default maximum number of distinct keys admitted
pub const DEFAULT_COUNT_LIMIT: usize = 100;

/// Default advisory aggregate byte-size limit (50 MiB)
pub const DEFAULT_TOTAL_COST_LIMIT: usize = 50 * 1024 * 1024;

// == Shared Handle ==
/// Thread-safe handle to a cache store shared across concurrent image
/// loads. The lock is the single serialization point for `put`/`get`.
pub type SharedCache = Arc<RwLock<CacheStore>>;
