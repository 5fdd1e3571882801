//! Configuration Module
//!
//! Plain-value configuration for the catalog core. Composition and wiring
//! belong to the embedding application shell; the core reads no environment
//! variables and touches no files.

use std::time::Duration;

/// Core configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of distinct keys the image cache admits
    pub cache_count_limit: usize,
    /// Advisory aggregate byte-size limit for the image cache
    pub cache_total_cost_limit: usize,
    /// Host serving the character catalog API
    pub api_host: String,
    /// Quiet period before a search-text change recomputes the filter
    pub search_debounce: Duration,
}

impl Config {
    /// Creates a Config with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_count_limit: crate::cache::DEFAULT_COUNT_LIMIT,
            cache_total_cost_limit: crate::cache::DEFAULT_TOTAL_COST_LIMIT,
            api_host: crate::transport::API_HOST.to_string(),
            search_debounce: Duration::from_millis(500),
        }
    }
}
