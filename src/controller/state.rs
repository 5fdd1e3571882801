//! List State Module
//!
//! View-state machine, the published snapshot type, and the pure state
//! transitions (merge, filter) they are built from.

use std::collections::HashSet;

use crate::models::Character;

// == View State ==
/// Lifecycle of the character list as observed by the presentation layer.
///
/// `Loading` is only entered while the accumulated list is empty; later
/// page fetches run without a visible loading phase. `Error` ends the
/// failed fetch attempt but not the controller; a retry may re-enter
/// `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet
    Idle,
    /// First page fetch in flight with nothing to show
    Loading,
    /// Fetch succeeded but the list is empty
    NoData,
    /// Characters available for display
    ShowData,
    /// Page fetch failed; carries the mapped human-readable message
    Error(String),
}

// == List Snapshot ==
/// Immutable snapshot of controller state published to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub view_state: ViewState,
    /// Accumulated characters across all fetched pages, deduplicated by id
    pub characters: Vec<Character>,
    /// Characters matching the current search text
    pub filtered_characters: Vec<Character>,
    pub search_text: String,
    /// 1-based page counter
    pub current_page: u32,
    /// Total pages reported by the last envelope; 0 before the first success
    pub total_pages: u32,
}

impl Default for ListSnapshot {
    fn default() -> Self {
        Self {
            view_state: ViewState::Idle,
            characters: Vec::new(),
            filtered_characters: Vec::new(),
            search_text: String::new(),
            current_page: 1,
            total_pages: 0,
        }
    }
}

// == List State ==
/// Mutable controller state. Mutated only at the controller's single
/// logical state-update point (behind its lock).
#[derive(Debug)]
pub(crate) struct ListState {
    pub view_state: ViewState,
    pub characters: Vec<Character>,
    pub filtered: Vec<Character>,
    pub search_text: String,
    pub current_page: u32,
    pub total_pages: u32,
    /// Ids already merged, backing O(1) dedup
    seen_ids: HashSet<u64>,
}

impl ListState {
    pub fn new() -> Self {
        Self {
            view_state: ViewState::Idle,
            characters: Vec::new(),
            filtered: Vec::new(),
            search_text: String::new(),
            current_page: 1,
            total_pages: 0,
            seen_ids: HashSet::new(),
        }
    }

    // == Merge ==
    /// Appends characters in page order, skipping ids merged before.
    /// First write wins; repeated pages contribute nothing.
    pub fn merge(&mut self, new_characters: Vec<Character>) {
        for character in new_characters {
            if self.seen_ids.insert(character.id) {
                self.characters.push(character);
            }
        }
    }

    // == Filter ==
    /// Recomputes the filtered view for the current search text.
    /// Case-insensitive substring match on `name`; empty text means the
    /// filtered view equals the full list. Never touches `view_state`.
    pub fn apply_filter(&mut self) {
        if self.search_text.is_empty() {
            self.filtered = self.characters.clone();
        } else {
            let needle = self.search_text.to_lowercase();
            self.filtered = self
                .characters
                .iter()
                .filter(|character| {
                    character
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect();
        }
    }

    // == Snapshot ==
    /// Clones the publishable view of this state.
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            view_state: self.view_state.clone(),
            characters: self.characters.clone(),
            filtered_characters: self.filtered.clone(),
            search_text: self.search_text.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}
