//! Client for the `SerpApi` Google search endpoint.
//!
//! Issues free-text queries biased toward an operating city and returns the
//! provider's multi-shape result as a typed [`SearchBundle`].

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::SerpApiClient;
pub use error::SerpApiError;
pub use types::{
    EventDate, EventResult, GpsCoordinates, KnowledgeGraph, LocalMap, LocalPlace, LocalResults,
    SearchBundle,
};
