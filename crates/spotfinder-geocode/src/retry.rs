//! Which geocoding failures are worth another attempt.

use crate::error::GeocodeError;

/// Returns `true` for errors that may succeed on a later attempt.
///
/// **Retriable:** timeouts, connection failures, HTTP 429/5xx, and the
/// provider statuses `OVER_QUERY_LIMIT` and `UNKNOWN_ERROR`.
///
/// **Not retriable:** `REQUEST_DENIED`, `INVALID_REQUEST`, malformed bodies,
/// non-numeric coordinates.
pub(crate) fn is_retriable(err: &GeocodeError) -> bool {
    match err {
        GeocodeError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| {
                    s.is_server_error() || s == reqwest::StatusCode::TOO_MANY_REQUESTS
                })
        }
        GeocodeError::Api { status, .. } => GeocodeError::is_transient_status(status),
        GeocodeError::Deserialize { .. }
        | GeocodeError::InvalidCoordinates { .. }
        | GeocodeError::InvalidBaseUrl { .. } => false,
    }
}
