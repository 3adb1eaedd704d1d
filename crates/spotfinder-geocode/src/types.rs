//! Geocoding API response types.

use serde::Deserialize;

/// Top-level response: `{"status": "OK", "results": [...]}`.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// Coordinates as sent by the provider. Kept loosely typed so that a
/// non-numeric value can be reported as [`crate::GeocodeError::InvalidCoordinates`].
#[derive(Debug, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub lat: serde_json::Value,
    #[serde(default)]
    pub lng: serde_json::Value,
}
