use thiserror::Error;

/// Errors returned by the geocoding client.
///
/// A "no match" answer is not an error; see [`crate::GeocodeClient::resolve`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a failure status such as
    /// `REQUEST_DENIED` or `OVER_QUERY_LIMIT`.
    #[error("geocoding provider returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The first result carried a latitude or longitude that is not a number.
    #[error("non-numeric coordinates returned for '{address}'")]
    InvalidCoordinates { address: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeocodeError {
    /// Provider statuses that indicate a temporary condition.
    pub(crate) fn is_transient_status(status: &str) -> bool {
        matches!(status, "OVER_QUERY_LIMIT" | "UNKNOWN_ERROR")
    }
}
