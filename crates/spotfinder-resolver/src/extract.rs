//! Normalization of search bundles into [`LocationRecord`]s.
//!
//! Two modes, never mixed:
//!
//! - **Listing** ([`extract_listing`]): one named activity. Merges the
//!   local-business card and the knowledge panel into a single record,
//!   geocoding the address when the bundle carries no map coordinates.
//! - **Event fallback** ([`extract_events`]): one category. Reads only the
//!   events carousel and yields one record per event that geocodes.

use futures::stream::{self, StreamExt};
use spotfinder_core::{Category, Color, Coordinates, LocationRecord};
use spotfinder_serpapi::SearchBundle;

use crate::provider::Geocoder;

/// The merged text fields of a bundle before coordinates are settled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub address: String,
    pub description: String,
    pub hours: String,
    pub coordinates: Option<Coordinates>,
}

impl ListingDraft {
    fn into_record(
        self,
        coordinates: Coordinates,
        category: Category,
        color: Color,
    ) -> LocationRecord {
        LocationRecord {
            title: self.title,
            address: self.address,
            description: self.description,
            hours: self.hours,
            lat: coordinates.lat,
            long: coordinates.long,
            color,
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither the listing nor the knowledge panel supplied an address.
    NoAddress,
    /// The geocoder found no match for the address.
    AddressNotFound,
    /// The geocoder failed (transport, provider status, bad coordinates).
    GeocodingUnavailable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoAddress => write!(f, "no address"),
            SkipReason::AddressNotFound => write!(f, "address not found"),
            SkipReason::GeocodingUnavailable => write!(f, "geocoding unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    Resolved(LocationRecord),
    Skip(SkipReason),
}

/// Merges the listing-mode fields of `bundle`.
///
/// The local listing supplies title, address, description, hours and the
/// accompanying map coordinates. A knowledge entity then fills the title
/// only if it is still empty, and always overwrites address, description
/// and hours. Returns `None` when the merged address is empty.
#[must_use]
pub fn merge_listing(bundle: &SearchBundle) -> Option<ListingDraft> {
    let mut draft = ListingDraft::default();

    if let Some(place) = bundle.local_listing() {
        draft.title = place.title.clone().unwrap_or_default();
        draft.address = place.address.clone().unwrap_or_default();
        draft.description = place.description.clone().unwrap_or_default();
        draft.hours = place.hours.clone().unwrap_or_default();
        draft.coordinates = bundle.map_coordinates();
    }

    if let Some(entity) = bundle.knowledge_entity() {
        if draft.title.is_empty() {
            draft.title = entity.title.clone().unwrap_or_default();
        }
        draft.address = entity.address.clone().unwrap_or_default();
        draft.description = entity.description.clone().unwrap_or_default();
        draft.hours = entity.hours.clone().unwrap_or_default();
    }

    if draft.address.trim().is_empty() {
        return None;
    }
    Some(draft)
}

/// Builds the single record for a named activity, or the reason it was skipped.
///
/// The geocoder is called at most once, and only when the bundle has an
/// address but no usable map coordinates. The events carousel is ignored.
pub async fn extract_listing<G: Geocoder>(
    bundle: &SearchBundle,
    category: Category,
    color: Color,
    geocoder: &G,
) -> ListingOutcome {
    let Some(draft) = merge_listing(bundle) else {
        return ListingOutcome::Skip(SkipReason::NoAddress);
    };

    if let Some(coordinates) = draft.coordinates {
        return ListingOutcome::Resolved(draft.into_record(coordinates, category, color));
    }

    match geocoder.geocode(&draft.address).await {
        Ok(Some(coordinates)) => {
            ListingOutcome::Resolved(draft.into_record(coordinates, category, color))
        }
        Ok(None) => ListingOutcome::Skip(SkipReason::AddressNotFound),
        Err(e) => {
            tracing::warn!(
                address = %draft.address,
                %category,
                error = %e,
                "geocoding unavailable, skipping listing"
            );
            ListingOutcome::Skip(SkipReason::GeocodingUnavailable)
        }
    }
}

/// Builds one record per event in the bundle's events carousel.
///
/// The local listing and knowledge panel are never read. Events without an
/// address, or whose address does not geocode, are dropped individually.
/// At most `max_concurrent` geocoding calls are in flight; output keeps the
/// carousel order.
pub async fn extract_events<G: Geocoder>(
    bundle: &SearchBundle,
    category: Category,
    color: Color,
    geocoder: &G,
    max_concurrent: usize,
) -> Vec<LocationRecord> {
    stream::iter(bundle.events())
        .map(|event| async move {
            let address = event.address_text();
            if address.is_empty() {
                tracing::debug!(%category, title = ?event.title, "event has no address, dropping");
                return None;
            }

            let coordinates = match geocoder.geocode(&address).await {
                Ok(Some(coordinates)) => coordinates,
                Ok(None) => {
                    tracing::debug!(%category, %address, "event address not found, dropping");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(
                        %category,
                        %address,
                        error = %e,
                        "geocoding unavailable, dropping event"
                    );
                    return None;
                }
            };

            let title = event.title.clone().unwrap_or_default();
            Some(LocationRecord {
                description: title.clone(),
                title,
                address,
                hours: event.hours_text(),
                lat: coordinates.lat,
                long: coordinates.long,
                color,
                category,
            })
        })
        .buffered(max_concurrent.max(1))
        .filter_map(|record| async move { record })
        .collect()
        .await
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
