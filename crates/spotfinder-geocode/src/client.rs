//! HTTP client for the geocoding endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use spotfinder_core::{retry_with_backoff, Coordinates, RetryPolicy};

use crate::error::GeocodeError;
use crate::retry::is_retriable;
use crate::types::GeocodeResponse;

const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Client for a Google-Geocoding-compatible endpoint.
///
/// No caching: every [`resolve`](Self::resolve) call is an independent
/// request.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    retry: RetryPolicy,
}

impl GeocodeClient {
    /// Creates a client pointed at the production Google endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_endpoint(api_key, timeout_secs, user_agent, DEFAULT_ENDPOINT)
    }

    /// Creates a client for a custom endpoint URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`GeocodeError::InvalidBaseUrl`] if `endpoint` does not parse.
    pub fn with_endpoint(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        endpoint: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(endpoint).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: parsed,
            retry: RetryPolicy::default(),
        })
    }

    /// Enables retries of transient failures.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    /// Resolves a free-text address to the coordinates of the provider's
    /// first result.
    ///
    /// Returns `Ok(None)` for `ZERO_RESULTS`, an `OK` answer with an empty
    /// result list, or a blank address (no request is made).
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// - [`GeocodeError::Api`] for any other provider status.
    /// - [`GeocodeError::Deserialize`] if the body does not match the
    ///   expected shape.
    /// - [`GeocodeError::InvalidCoordinates`] if the first result's
    ///   coordinates are not numeric.
    pub async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let url = self.build_url(address);
        let response = retry_with_backoff(self.retry, "geocode", is_retriable, || {
            self.request(&url, address)
        })
        .await?;

        let Some(first) = response.results.first() else {
            tracing::debug!(address, status = %response.status, "address not found");
            return Ok(None);
        };

        let location = &first.geometry.location;
        match Coordinates::from_values(&location.lat, &location.lng) {
            Some(coords) => {
                tracing::debug!(
                    address,
                    matched = first.formatted_address.as_deref().unwrap_or_default(),
                    lat = coords.lat,
                    long = coords.long,
                    "address resolved"
                );
                Ok(Some(coords))
            }
            None => Err(GeocodeError::InvalidCoordinates {
                address: address.to_string(),
            }),
        }
    }

    fn build_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    /// One attempt: fetch, decode and check the status field. `OK` and
    /// `ZERO_RESULTS` are both successful answers.
    async fn request(&self, url: &Url, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        // Transport errors carry the request URL, which includes the key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        match parsed.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(parsed),
            _ => Err(GeocodeError::Api {
                message: parsed.error_message.unwrap_or_default(),
                status: parsed.status,
            }),
        }
    }
}
