//! HTTP client for the `SerpApi` search endpoint.
//!
//! Wraps `reqwest` with API key management, transient-error retries and
//! envelope checking. The provider reports an empty result set through its
//! `"error"` field; that case is mapped to an empty [`SearchBundle`] rather
//! than an error.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use spotfinder_core::{retry_with_backoff, RetryPolicy};

use crate::error::SerpApiError;
use crate::retry::is_retriable;
use crate::types::SearchBundle;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const SEARCH_ENGINE: &str = "google";
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Client for the `SerpApi` Google search endpoint.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
}

impl SerpApiClient {
    /// Creates a new client pointed at the production `SerpApi` host.
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SerpApiError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SerpApiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SerpApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining `search.json` appends a
        // segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SerpApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            retry: RetryPolicy::default(),
        })
    }

    /// Enables retries of transient failures (timeouts, connect errors,
    /// HTTP 429/5xx).
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    /// Runs one search for `query`, biased toward `location`.
    ///
    /// # Errors
    ///
    /// - [`SerpApiError::Api`] if the provider reports an error other than
    ///   an empty result set.
    /// - [`SerpApiError::Http`] on network failure or a non-2xx status, once
    ///   retries are exhausted.
    /// - [`SerpApiError::Deserialize`] if the body is not JSON.
    pub async fn search(&self, query: &str, location: &str) -> Result<SearchBundle, SerpApiError> {
        let url = self.build_url(query, location)?;
        tracing::debug!(query, location, "issuing place search");

        let body = retry_with_backoff(self.retry, "serpapi", is_retriable, || {
            self.request_json(&url)
        })
        .await?;

        if Self::check_api_error(&body)? {
            tracing::debug!(query, "provider returned no results");
            return Ok(SearchBundle::default());
        }

        serde_json::from_value(body).map_err(|e| SerpApiError::Deserialize {
            context: format!("search(q={query})"),
            source: e,
        })
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str, location: &str) -> Result<Url, SerpApiError> {
        let mut url = self
            .base_url
            .join("search.json")
            .map_err(|e| SerpApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("engine", SEARCH_ENGINE)
            .append_pair("q", query)
            .append_pair("location", location)
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// 429 and 5xx become [`SerpApiError::Http`] (retriable). Other 4xx
    /// responses carry the provider's `"error"` message and become
    /// [`SerpApiError::Api`].
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SerpApiError> {
        // Transport errors carry the request URL, which includes the key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();

        if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(SerpApiError::Api(message));
        }

        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| SerpApiError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }

    /// Inspects the `"error"` field. Returns `Ok(true)` when it only reports
    /// an empty result set.
    fn check_api_error(body: &serde_json::Value) -> Result<bool, SerpApiError> {
        match body.get("error").and_then(serde_json::Value::as_str) {
            None => Ok(false),
            Some(msg) if msg.contains(NO_RESULTS_MARKER) => Ok(true),
            Some(msg) => Err(SerpApiError::Api(msg.to_string())),
        }
    }
}

/// Renders `url` without its `api_key` parameter, for error contexts.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "api_key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
