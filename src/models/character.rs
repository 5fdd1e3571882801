//! Character Models
//!
//! Decode targets for the catalog list endpoint. The wire format is
//! `{ "info": {...}, "results": [...] }`; every result field except `id`
//! is optional.

use serde::Deserialize;

// == Page Info ==
/// Pagination envelope accompanying every page of results.
///
/// `next` and `prev` are opaque continuation markers. They are decoded for
/// completeness but pagination is driven by an explicit page counter, so
/// nothing in the controller consults them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    /// Total number of characters across all pages
    pub count: u32,
    /// Total number of pages
    pub pages: u32,
    /// Continuation marker for the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// Continuation marker for the previous page, if any
    #[serde(default)]
    pub prev: Option<String>,
}

// == Character ==
/// One catalog record. `id` is the stable identifier used for
/// deduplication; `image` is an absolute URL doubling as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Character {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// == Character Page ==
/// One decoded page of the character list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}
