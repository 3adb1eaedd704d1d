//! Which `SerpApi` failures are worth another attempt.
//!
//! Only transport-level trouble is retried. An `"error"` envelope from the
//! provider (bad key, exhausted plan) is returned on the first attempt.

use crate::error::SerpApiError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429 and 5xx.
///
/// **Not retriable:** [`SerpApiError::Api`], [`SerpApiError::Deserialize`],
/// [`SerpApiError::InvalidBaseUrl`], and any other HTTP status.
pub(crate) fn is_retriable(err: &SerpApiError) -> bool {
    match err {
        SerpApiError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| {
                    s.is_server_error() || s == reqwest::StatusCode::TOO_MANY_REQUESTS
                })
        }
        SerpApiError::Api(_)
        | SerpApiError::Deserialize { .. }
        | SerpApiError::InvalidBaseUrl { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect_error() -> SerpApiError {
        let err = reqwest::Client::new()
            .get("http://0.0.0.0:1")
            .send()
            .await
            .unwrap_err();
        SerpApiError::Http(err)
    }

    #[test]
    fn api_error_is_not_retriable() {
        assert!(!is_retriable(&SerpApiError::Api("Invalid API key.".to_owned())));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&SerpApiError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[tokio::test]
    async fn connect_error_is_retriable() {
        assert!(is_retriable(&connect_error().await));
    }
}
