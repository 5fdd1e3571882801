//! Character Catalog - the reusable core of a character browser
//!
//! Provides an in-memory bounded image cache with admission control and a
//! paginated list controller with deduplication, debounced search filtering
//! and single-flight fetch semantics.

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod image_loader;
pub mod models;
pub mod tasks;
pub mod transport;

pub use cache::{CacheStore, SharedCache};
pub use config::Config;
pub use controller::{CharacterListController, ListSnapshot, ViewState};
pub use error::{CacheError, FetchError};
pub use image_loader::ImageLoadCoordinator;
pub use models::{Character, CharacterPage, PageInfo};
pub use transport::{CatalogEndpoint, DownloadService, FetchService, HttpClient, ImageDownloader};
