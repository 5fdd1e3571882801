//! Character List Controller
//!
//! Owns the pagination cursor, the accumulated character list, and the
//! search filter. Page fetches are single-flight: a new fetch supersedes
//! the previous one, and superseded results never reach the state. Fetch
//! failures surface through the view state, never as panics or returned
//! errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::debug;

use crate::config::Config;
use crate::controller::state::{ListSnapshot, ListState, ViewState};
use crate::error::FetchError;
use crate::tasks::SingleFlight;
use crate::transport::FetchService;

// == Controller ==
/// Paginated character list controller.
///
/// Cheap to clone; clones share the same state and task slots.
#[derive(Clone)]
pub struct CharacterListController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    fetcher: Arc<dyn FetchService>,
    state: Mutex<ListState>,
    /// One page-fetch slot controller-wide
    fetch_flight: SingleFlight,
    /// One debounce-timer slot controller-wide
    debounce_flight: SingleFlight,
    debounce: Duration,
    changes: watch::Sender<ListSnapshot>,
}

impl CharacterListController {
    // == Constructor ==
    /// Creates an idle controller over a fetch transport.
    pub fn new(fetcher: Arc<dyn FetchService>, config: &Config) -> Self {
        let (changes, _) = watch::channel(ListSnapshot::default());
        Self {
            inner: Arc::new(ControllerInner {
                fetcher,
                state: Mutex::new(ListState::new()),
                fetch_flight: SingleFlight::new(),
                debounce_flight: SingleFlight::new(),
                debounce: config.search_debounce,
                changes,
            }),
        }
    }

    // == Observation ==
    /// Subscribes to state snapshots. The receiver always yields the most
    /// recent snapshot; intermediate snapshots may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.inner.changes.subscribe()
    }

    /// Returns the current state snapshot.
    pub fn snapshot(&self) -> ListSnapshot {
        self.inner.changes.borrow().clone()
    }

    // == Start ==
    /// Triggers the first page fetch. No-op unless the controller is idle.
    pub async fn start(&self) {
        {
            let state = self.inner.state.lock().await;
            if state.view_state != ViewState::Idle {
                return;
            }
        }
        self.fetch_page().await;
    }

    // == Fetch Page ==
    /// Fetches the current page, superseding any in-flight fetch.
    pub async fn fetch_page(&self) {
        let inner = Arc::clone(&self.inner);
        let ticket = inner.fetch_flight.begin();
        let task = tokio::spawn(ControllerInner::run_fetch(Arc::clone(&inner), ticket));
        inner.fetch_flight.track(ticket, task.abort_handle());
    }

    // == Load More ==
    /// Advances to the next page. No-op while a loading phase is visible
    /// or when all pages have been fetched.
    pub async fn load_more(&self) {
        {
            let mut state = self.inner.state.lock().await;
            if state.view_state == ViewState::Loading || state.current_page >= state.total_pages {
                return;
            }
            state.current_page += 1;
        }
        self.fetch_page().await;
    }

    // == Search ==
    /// Updates the search text. The filtered view recomputes only after a
    /// quiet period with no further updates; earlier pending values are
    /// discarded, not queued.
    pub async fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.inner.state.lock().await;
            state.search_text = text;
            self.inner.publish(&state);
        }

        let ticket = self.inner.debounce_flight.begin();
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if !inner.debounce_flight.is_live(ticket) {
                return;
            }
            let mut state = inner.state.lock().await;
            if !inner.debounce_flight.is_live(ticket) {
                return;
            }
            state.apply_filter();
            inner.publish(&state);
        });
        self.inner.debounce_flight.track(ticket, task.abort_handle());
    }
}

impl ControllerInner {
    /// Publishes the current state to all observers.
    fn publish(&self, state: &ListState) {
        self.changes.send_replace(state.snapshot());
    }

    /// One page-fetch unit of work. The ticket is re-checked before every
    /// state mutation so a superseded fetch never applies late results.
    async fn run_fetch(inner: Arc<ControllerInner>, ticket: u64) {
        let page_number = {
            let mut state = inner.state.lock().await;
            if !inner.fetch_flight.is_live(ticket) {
                return;
            }
            // Loading is only user-visible while there is nothing to show.
            if state.characters.is_empty() {
                state.view_state = ViewState::Loading;
                inner.publish(&state);
            }
            state.current_page
        };

        match inner.fetcher.character_page(page_number).await {
            Ok(envelope) => {
                let mut state = inner.state.lock().await;
                if !inner.fetch_flight.is_live(ticket) {
                    return;
                }
                state.total_pages = envelope.info.pages;
                state.merge(envelope.results);
                state.view_state = if state.characters.is_empty() {
                    ViewState::NoData
                } else {
                    ViewState::ShowData
                };
                state.apply_filter();
                inner.publish(&state);
            }
            Err(err) => {
                let mut state = inner.state.lock().await;
                if !inner.fetch_flight.is_live(ticket) {
                    return;
                }
                match err.downcast_ref::<FetchError>() {
                    Some(fetch_err) => {
                        state.view_state = ViewState::Error(fetch_err.to_string());
                        inner.publish(&state);
                    }
                    None => {
                        // Errors outside the recognized taxonomy never
                        // reach the view state.
                        debug!(error = %err, page = page_number, "unclassified fetch error dropped");
                    }
                }
            }
        }
    }
}
