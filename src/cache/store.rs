//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with count-based admission
//! control. Once the distinct-key limit is reached, inserts of new keys are
//! rejected; overwrites of already-admitted keys still succeed. There is no
//! eviction. This is a deliberate simplification, not an incomplete LRU.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, SharedCache};
use crate::error::{CacheError, CacheResult};

// == Cache Store ==
/// Bounded key-to-blob store for downloaded images.
///
/// Keys are image URLs; values are the raw downloaded bytes. The byte-size
/// limit is advisory: it is tracked and logged when exceeded, but only the
/// count limit and the non-empty-payload check reject inserts.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Keys admitted past capacity control
    admitted: HashSet<String>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of distinct keys allowed
    count_limit: usize,
    /// Advisory aggregate byte-size limit
    total_cost_limit: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given limits.
    ///
    /// # Arguments
    /// * `count_limit` - Maximum number of distinct keys the cache admits
    /// * `total_cost_limit` - Advisory aggregate byte-size limit
    pub fn new(count_limit: usize, total_cost_limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            admitted: HashSet::new(),
            stats: CacheStats::new(),
            count_limit,
            total_cost_limit,
        }
    }

    /// Creates a new CacheStore from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.cache_count_limit, config.cache_total_cost_limit)
    }

    /// Wraps the store in the shared handle used by concurrent image loads.
    pub fn into_shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    // == Put ==
    /// Stores a payload under a key.
    ///
    /// Fails with `InvalidPayload` for empty payloads and with
    /// `CapacityExceeded` when the key is new and the cache is full.
    /// Overwriting an admitted key succeeds even at capacity.
    ///
    /// # Arguments
    /// * `key` - The image URL the payload was downloaded from
    /// * `data` - The raw payload bytes
    pub fn put(&mut self, key: &str, data: Bytes) -> CacheResult<()> {
        if data.is_empty() {
            return Err(CacheError::InvalidPayload(key.to_string()));
        }

        let is_overwrite = self.admitted.contains(key);

        // Admission control: reject new keys at capacity instead of evicting.
        if !is_overwrite && self.admitted.len() >= self.count_limit {
            self.stats.record_rejection();
            return Err(CacheError::CapacityExceeded {
                limit: self.count_limit,
            });
        }

        self.entries.insert(key.to_string(), CacheEntry::new(data));
        if !is_overwrite {
            self.admitted.insert(key.to_string());
        }

        self.stats.set_total_entries(self.entries.len());
        let total_cost = self.total_cost();
        self.stats.set_total_cost(total_cost);
        if total_cost > self.total_cost_limit {
            debug!(
                total_cost,
                limit = self.total_cost_limit,
                "cache byte cost above advisory limit"
            );
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// A miss is a reportable `NotFound` error rather than a silent null;
    /// call sites treat it as "must download".
    pub fn get(&mut self, key: &str) -> CacheResult<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Ok(entry.data.clone())
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Clear ==
    /// Removes all entries and resets the admitted key set.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.admitted.clear();
        self.stats.set_total_entries(0);
        self.stats.set_total_cost(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats.set_total_cost(self.total_cost());
        stats
    }

    // == Total Cost ==
    /// Aggregate byte cost of all entries.
    pub fn total_cost(&self) -> usize {
        self.entries.values().map(CacheEntry::cost).sum()
    }

    // == Contains ==
    /// Checks whether a key is currently cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
