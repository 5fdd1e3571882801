//! Integration Tests for Catalog Flows
//!
//! Exercises the full controller and image pipeline against trait-level
//! mock transports: pagination across pages, search over merged results,
//! error surfacing, and the cache-backed image path.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;

use character_catalog::{
    CacheStore, Character, CharacterListController, CharacterPage, Config, DownloadService,
    FetchError, FetchService, ImageLoadCoordinator, ListSnapshot, PageInfo, ViewState,
};

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "character_catalog=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn character(id: u64, name: &str) -> Character {
    Character {
        id,
        name: Some(name.to_string()),
        status: Some("Alive".to_string()),
        gender: Some("Male".to_string()),
        image: Some(format!("https://img.example.com/{id}.jpeg")),
    }
}

fn page(count: u32, pages: u32, characters: Vec<Character>) -> CharacterPage {
    CharacterPage {
        info: PageInfo {
            count,
            pages,
            next: Some("unused-continuation-marker".to_string()),
            prev: None,
        },
        results: characters,
    }
}

async fn wait_for<F>(rx: &mut watch::Receiver<ListSnapshot>, pred: F) -> ListSnapshot
where
    F: Fn(&ListSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if pred(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("controller dropped");
        }
    })
    .await
    .expect("expected state never published")
}

// == Mock Transports ==

/// Page-keyed fetch transport; optionally fails every call.
struct MockCatalog {
    pages: Vec<CharacterPage>,
    failure: Option<FetchError>,
    calls: AtomicU32,
}

impl MockCatalog {
    fn new(pages: Vec<CharacterPage>) -> Arc<Self> {
        Arc::new(Self {
            pages,
            failure: None,
            calls: AtomicU32::new(0),
        })
    }

    fn failing(failure: FetchError) -> Arc<Self> {
        Arc::new(Self {
            pages: Vec::new(),
            failure: Some(failure),
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl FetchService for MockCatalog {
    async fn character_page(&self, page: u32) -> anyhow::Result<CharacterPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = &self.failure {
            return Err(failure.clone().into());
        }
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .ok_or_else(|| FetchError::FailedResponse { status_code: 404 }.into())
    }
}

/// Download transport handing out one scripted payload per call.
struct MockImageServer {
    payloads: Mutex<VecDeque<anyhow::Result<Bytes>>>,
    calls: AtomicU32,
}

impl MockImageServer {
    fn new(payloads: Vec<anyhow::Result<Bytes>>) -> Arc<Self> {
        Arc::new(Self {
            payloads: Mutex::new(payloads.into()),
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl DownloadService for MockImageServer {
    async fn download(&self, _url: &str) -> anyhow::Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads
            .lock()
            .unwrap()
            .pop_front()
            .expect("image script exhausted")
    }
}

// == Pagination Flow ==

#[tokio::test]
async fn two_page_catalog_accumulates_twenty_unique_characters() {
    init_tracing();

    let first: Vec<Character> = (1..=10).map(|id| character(id, &format!("Char {id}"))).collect();
    let second: Vec<Character> = (11..=20).map(|id| character(id, &format!("Char {id}"))).collect();
    let catalog = MockCatalog::new(vec![page(20, 2, first), page(20, 2, second)]);

    let controller = CharacterListController::new(catalog.clone(), &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    let snapshot = wait_for(&mut rx, |s| s.view_state == ViewState::ShowData).await;
    assert_eq!(snapshot.characters.len(), 10);
    assert_eq!(snapshot.total_pages, 2);

    controller.load_more().await;
    let snapshot = wait_for(&mut rx, |s| s.characters.len() == 20).await;

    assert_eq!(snapshot.current_page, 2);
    let unique: HashSet<u64> = snapshot.characters.iter().map(|c| c.id).collect();
    assert_eq!(unique.len(), 20);
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn overlapping_pages_never_duplicate_ids() {
    init_tracing();

    // The second page repeats half of the first page's ids.
    let first: Vec<Character> = (1..=10).map(|id| character(id, &format!("Char {id}"))).collect();
    let second: Vec<Character> = (6..=15).map(|id| character(id, &format!("Char {id}"))).collect();
    let catalog = MockCatalog::new(vec![page(15, 2, first), page(15, 2, second)]);

    let controller = CharacterListController::new(catalog, &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    wait_for(&mut rx, |s| s.view_state == ViewState::ShowData).await;
    controller.load_more().await;
    let snapshot = wait_for(&mut rx, |s| s.characters.len() == 15).await;

    let ids: Vec<u64> = snapshot.characters.iter().map(|c| c.id).collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

// == Error Flow ==

#[tokio::test]
async fn failed_response_surfaces_exact_message_and_keeps_entities() {
    init_tracing();

    let catalog = MockCatalog::failing(FetchError::FailedResponse { status_code: 404 });
    let controller = CharacterListController::new(catalog, &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    let snapshot = wait_for(&mut rx, |s| matches!(s.view_state, ViewState::Error(_))).await;

    assert_eq!(
        snapshot.view_state,
        ViewState::Error("Failed Response With StatusCode:404".to_string())
    );
    assert!(snapshot.characters.is_empty());
}

#[tokio::test]
async fn rate_limit_surfaces_its_fixed_message() {
    init_tracing();

    let catalog = MockCatalog::failing(FetchError::RateLimitExceeded);
    let controller = CharacterListController::new(catalog, &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    let snapshot = wait_for(&mut rx, |s| matches!(s.view_state, ViewState::Error(_))).await;

    assert_eq!(
        snapshot.view_state,
        ViewState::Error("Rate Limit Exceeded You Can Try Again In 1-2 hours".to_string())
    );
}

#[tokio::test]
async fn failed_later_page_keeps_already_merged_entities() {
    init_tracing();

    let first: Vec<Character> = (1..=10).map(|id| character(id, &format!("Char {id}"))).collect();
    // Page 2 is absent from the mock, which reports a failed response.
    let catalog = MockCatalog::new(vec![page(20, 2, first)]);

    let controller = CharacterListController::new(catalog, &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    wait_for(&mut rx, |s| s.view_state == ViewState::ShowData).await;
    controller.load_more().await;

    let snapshot = wait_for(&mut rx, |s| matches!(s.view_state, ViewState::Error(_))).await;
    // No rollback of the merged first page.
    assert_eq!(snapshot.characters.len(), 10);
}

// == Search Flow ==

#[tokio::test]
async fn search_filters_across_merged_pages() {
    init_tracing();

    let first = vec![
        character(1, "Rick Sanchez"),
        character(2, "Morty Smith"),
        character(3, "Summer Smith"),
    ];
    let second = vec![character(4, "Pickle Rick"), character(5, "Birdperson")];
    let catalog = MockCatalog::new(vec![page(5, 2, first), page(5, 2, second)]);

    let controller = CharacterListController::new(catalog, &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    wait_for(&mut rx, |s| s.view_state == ViewState::ShowData).await;
    controller.load_more().await;
    wait_for(&mut rx, |s| s.characters.len() == 5).await;

    controller.set_search_text("rick").await;
    let snapshot = wait_for(&mut rx, |s| s.filtered_characters.len() == 2).await;
    let ids: Vec<u64> = snapshot.filtered_characters.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(snapshot.view_state, ViewState::ShowData);

    // Clearing the search restores the full list.
    controller.set_search_text("").await;
    let snapshot = wait_for(&mut rx, |s| s.filtered_characters.len() == 5).await;
    assert_eq!(snapshot.filtered_characters, snapshot.characters);
}

// == Image Flow ==

#[tokio::test]
async fn visible_characters_load_images_through_the_shared_cache() {
    init_tracing();

    let characters = vec![character(1, "Rick Sanchez"), character(2, "Morty Smith")];
    let catalog = MockCatalog::new(vec![page(2, 1, characters)]);
    let controller = CharacterListController::new(catalog, &Config::default());
    let mut rx = controller.subscribe();

    controller.start().await;
    let snapshot = wait_for(&mut rx, |s| s.view_state == ViewState::ShowData).await;

    let cache = CacheStore::from_config(&Config::default()).into_shared();
    let images = MockImageServer::new(vec![
        Ok(Bytes::from_static(b"rick-bytes")),
        Ok(Bytes::from_static(b"morty-bytes")),
    ]);

    // One coordinator per visible cell, all sharing the cache.
    for character in &snapshot.characters {
        let url = character.image.as_deref().unwrap();
        let coordinator = ImageLoadCoordinator::new(Arc::clone(&cache), images.clone());
        let bytes = coordinator.load_image(url).await;
        assert!(bytes.is_some());
    }
    assert_eq!(images.calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.read().await.len(), 2);

    // A second pass over the same cells is served entirely from the cache.
    for character in &snapshot.characters {
        let url = character.image.as_deref().unwrap();
        let coordinator = ImageLoadCoordinator::new(Arc::clone(&cache), images.clone());
        let bytes = coordinator.load_image(url).await;
        assert!(bytes.is_some());
    }
    assert_eq!(images.calls.load(Ordering::SeqCst), 2);

    let stats = cache.read().await.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 2);
}

#[tokio::test]
async fn clearing_the_cache_forces_redownload() {
    init_tracing();

    let cache = CacheStore::new(10, 1024 * 1024).into_shared();
    let images = MockImageServer::new(vec![
        Ok(Bytes::from_static(b"v1")),
        Ok(Bytes::from_static(b"v2")),
    ]);
    let coordinator = ImageLoadCoordinator::new(Arc::clone(&cache), images.clone());

    let url = "https://img.example.com/1.jpeg";
    assert_eq!(coordinator.load_image(url).await.as_deref(), Some(&b"v1"[..]));

    cache.write().await.clear();

    assert_eq!(coordinator.load_image(url).await.as_deref(), Some(&b"v2"[..]));
    assert_eq!(images.calls.load(Ordering::SeqCst), 2);
}
