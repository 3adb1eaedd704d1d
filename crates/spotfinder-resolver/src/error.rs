use thiserror::Error;

/// Failures while building a [`crate::Resolver`] from configuration.
///
/// Resolution itself never fails: provider errors are degraded to skipped
/// activities or empty fallback results.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("search client: {0}")]
    Search(#[from] spotfinder_serpapi::SerpApiError),

    #[error("geocoding client: {0}")]
    Geocode(#[from] spotfinder_geocode::GeocodeError),
}
