use std::time::Duration;

use url::Url;

use crate::config::AppConfig;
use crate::error::{MinneError, SearchError};
use crate::model::Product;

const SEARCH_PATH: &str = "/api/search";

/// Client for the search endpoint. Issues exactly one GET per call and
/// classifies failures; it never retries. Cheap to clone (the underlying
/// `reqwest::Client` is reference-counted), which lets the shell hand a copy
/// to each spawned fetch task.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_ms: u64,
}

impl SearchClient {
    pub fn new(config: &AppConfig) -> Result<Self, MinneError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| MinneError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(SearchClient {
            http,
            base_url,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Fetch the listings for a validated keyword. The keyword is URL-escaped
    /// into the `keyword` query parameter. Timeouts become
    /// `SearchError::Timeout`; every other transport, status or decode
    /// failure becomes `SearchError::Network`.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Product>, SearchError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| SearchError::Network(e.to_string()))?;
        url.query_pairs_mut().append_pair("keyword", keyword);

        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.classify(e))?;

        let products = response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| self.classify(e))?;

        tracing::info!("Fetched {} listings for \"{}\"", products.len(), keyword);
        Ok(products)
    }

    fn classify(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout(self.timeout_ms)
        } else {
            SearchError::Network(err.to_string())
        }
    }
}
