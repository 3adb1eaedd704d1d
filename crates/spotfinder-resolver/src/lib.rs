//! Activity-location resolution.
//!
//! Turns named restaurants, concerts and sports events into geolocated
//! [`LocationRecord`]s in two passes: a direct search per activity, then one
//! category-level event search for every category in which some activity
//! could not be placed.
//!
//! [`LocationRecord`]: spotfinder_core::LocationRecord

pub mod error;
pub mod extract;
pub mod pipeline;
pub mod provider;

pub use error::ResolverError;
pub use extract::{
    extract_events, extract_listing, merge_listing, ListingDraft, ListingOutcome, SkipReason,
};
pub use pipeline::{ActivityOutcome, DirectPass, Resolver, ResolverSettings};
pub use provider::{Geocoder, PlaceSearch};

#[cfg(test)]
mod test_support;
