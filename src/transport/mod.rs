//! Transport Module
//!
//! HTTP-facing adapters for the catalog core: typed endpoint descriptions,
//! the generic decode-fetch client, and the raw image downloader. The
//! controller and coordinator depend only on the capability traits so they
//! can be exercised against mocks.

pub mod client;
pub mod download;
pub mod endpoint;

pub use client::{FetchService, HttpClient};
pub use download::{DownloadService, ImageDownloader};
pub use endpoint::{CatalogEndpoint, API_HOST, API_PATH_PREFIX, API_SCHEME};
