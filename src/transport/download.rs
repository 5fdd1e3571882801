//! Image Download Module
//!
//! Raw-bytes download capability for thumbnail images. No headers, no auth,
//! single attempt.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::FetchError;

// == Download Capability ==
/// Capability for downloading raw image bytes from an absolute URL.
#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Downloads the resource at `url` and returns its body.
    async fn download(&self, url: &str) -> anyhow::Result<Bytes>;
}

// == Image Downloader ==
/// Image byte transport backed by its own reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ImageDownloader {
    client: reqwest::Client,
}

impl ImageDownloader {
    // == Constructor ==
    /// Creates a new downloader.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DownloadService for ImageDownloader {
    async fn download(&self, url: &str) -> anyhow::Result<Bytes> {
        let url = Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::FailedResponse {
                status_code: status.as_u16(),
            }
            .into());
        }

        Ok(response.bytes().await?)
    }
}
