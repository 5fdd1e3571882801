//! HTTP Client Module
//!
//! Generic decode-fetch against the catalog API. Recognized failures map to
//! the `FetchError` taxonomy; connection-level failures stay opaque and are
//! handled by the caller's error policy.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::FetchError;
use crate::models::CharacterPage;
use crate::transport::endpoint::CatalogEndpoint;

// == Fetch Capability ==
/// Capability for fetching decoded catalog payloads.
///
/// Object-safe so the list controller can run against mock transports.
#[async_trait]
pub trait FetchService: Send + Sync {
    /// Fetches one page of the character list.
    async fn character_page(&self, page: u32) -> anyhow::Result<CharacterPage>;
}

// == HTTP Client ==
/// Catalog API client backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    host: String,
}

impl HttpClient {
    // == Constructor ==
    /// Creates a client targeting the configured catalog host.
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: config.api_host.clone(),
        }
    }

    // == Fetch ==
    /// Performs a single GET against an endpoint and decodes the JSON body.
    ///
    /// Status mapping: 429 becomes `RateLimitExceeded`, any other non-2xx
    /// becomes `FailedResponse`, and an undecodable body becomes
    /// `DecodeFailed`. One attempt only; retry policy belongs to callers.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &CatalogEndpoint,
    ) -> anyhow::Result<T> {
        let url = endpoint.url(&self.host)?;

        let mut request = self.client.request(endpoint.method(), url);
        for (name, value) in CatalogEndpoint::headers() {
            request = request.header(name, value);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimitExceeded.into());
        }
        if !status.is_success() {
            return Err(FetchError::FailedResponse {
                status_code: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await?;
        serde_json::from_slice(body.as_ref())
            .map_err(|err| FetchError::DecodeFailed(err.to_string()).into())
    }
}

#[async_trait]
impl FetchService for HttpClient {
    async fn character_page(&self, page: u32) -> anyhow::Result<CharacterPage> {
        self.fetch(&CatalogEndpoint::Characters { page }).await
    }
}
