//! Endpoint Module
//!
//! Typed descriptions of the catalog API endpoints and the URL assembly
//! behind them.

use reqwest::Method;
use url::Url;

use crate::error::FetchError;

// == API Constants ==
/// URL scheme for all catalog requests
pub const API_SCHEME: &str = "https";

/// Default catalog host
pub const API_HOST: &str = "rickandmortyapi.com";

/// Path prefix shared by all catalog resources
pub const API_PATH_PREFIX: &str = "/api";

// == Catalog Endpoint ==
/// The endpoints the catalog core knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEndpoint {
    /// Paginated character list
    Characters {
        /// 1-based page number
        page: u32,
    },
    /// Single character detail by id
    Character {
        /// Character identifier
        id: u64,
    },
}

impl CatalogEndpoint {
    // == Path ==
    /// Resource path below the API prefix.
    pub fn path(&self) -> String {
        match self {
            Self::Characters { .. } => "/character".to_string(),
            Self::Character { id } => format!("/character/{id}"),
        }
    }

    // == Query ==
    /// Query parameters for this endpoint.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Characters { page } => vec![("page", page.to_string())],
            Self::Character { .. } => Vec::new(),
        }
    }

    // == Method ==
    /// HTTP method; every catalog endpoint is a GET.
    pub fn method(&self) -> Method {
        Method::GET
    }

    // == Headers ==
    /// Headers sent with every catalog request.
    pub fn headers() -> [(&'static str, &'static str); 2] {
        [
            ("Content-Type", "application/json"),
            ("Accept", "application/json"),
        ]
    }

    // == URL ==
    /// Assembles the absolute URL for this endpoint against a host.
    pub fn url(&self, host: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{API_SCHEME}://{host}"))
            .map_err(|_| FetchError::InvalidUrl)?;
        url.set_path(&format!("{API_PATH_PREFIX}{}", self.path()));

        let query = self.query();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}
