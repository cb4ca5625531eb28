//! API client for the players endpoint.
//!
//! One call per page: build the URL, GET it, fail on a non-success status,
//! decode the body. There is no retry and no caching.

use std::time::Duration;

use reqwest::{header, Client, Url};
use tracing::debug;

use crate::config::Config;
use crate::models::PageResult;

use super::ApiError;

/// API client for the players endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    players_endpoint: Url,
    page_size: u32,
}

impl ApiClient {
    /// Create a new API client from configuration.
    /// Fails when the base URL or API key cannot be used.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let endpoint = format!("{}/players", config.base_url().trim_end_matches('/'));
        let players_endpoint = Url::parse(&endpoint)
            .map_err(|e| ApiError::InvalidConfig(format!("base URL {:?}: {}", config.base_url(), e)))?;

        let mut builder = Client::builder().default_headers(Self::default_headers(config)?);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            players_endpoint,
            page_size: config.page_size(),
        })
    }

    fn default_headers(config: &Config) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        if let Some(ref key) = config.api_key {
            let mut value = header::HeaderValue::from_str(key)
                .map_err(|_| ApiError::InvalidConfig("API key contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build `{base}/players?page={page}&per_page={page_size}`.
    pub fn players_url(&self, page: u32) -> Url {
        let mut url = self.players_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.page_size.to_string());
        url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Fetch and decode one page of players.
    pub async fn fetch_page(&self, page: u32) -> Result<PageResult, ApiError> {
        let url = self.players_url(page);
        debug!(%url, "Fetching players page");

        let response = self.client.get(url).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        let result = PageResult::from_json(&body)?;
        debug!(
            page,
            players = result.players.len(),
            total_pages = result.total_pages,
            "Players page decoded"
        );
        Ok(result)
    }
}
