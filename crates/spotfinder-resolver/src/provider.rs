//! Seams between the pipeline and its external providers.
//!
//! The production implementations are the HTTP clients; tests substitute
//! in-memory fakes.

use std::future::Future;

use spotfinder_core::Coordinates;
use spotfinder_geocode::{GeocodeClient, GeocodeError};
use spotfinder_serpapi::{SearchBundle, SerpApiClient, SerpApiError};

/// Free-text local search biased toward a location.
pub trait PlaceSearch {
    fn search(
        &self,
        query: &str,
        location: &str,
    ) -> impl Future<Output = Result<SearchBundle, SerpApiError>> + Send;
}

/// Address to coordinates. `Ok(None)` means the provider found no match.
pub trait Geocoder {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinates>, GeocodeError>> + Send;
}

impl PlaceSearch for SerpApiClient {
    fn search(
        &self,
        query: &str,
        location: &str,
    ) -> impl Future<Output = Result<SearchBundle, SerpApiError>> + Send {
        SerpApiClient::search(self, query, location)
    }
}

impl Geocoder for GeocodeClient {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinates>, GeocodeError>> + Send {
        self.resolve(address)
    }
}
