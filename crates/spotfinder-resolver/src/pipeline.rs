//! The two-phase resolution pipeline.
//!
//! Phase 1 searches every activity by name and yields a [`DirectPass`].
//! Phase 2 runs one `"<category> events"` search for each category left in
//! [`DirectPass::unresolved`] and appends whatever events geocode. Phase 2
//! never starts before every phase-1 outcome is known.

use std::collections::BTreeSet;

use futures::stream::{self, StreamExt};
use spotfinder_core::{
    ActivityQuery, AppConfig, Category, CoreError, LocationRecord, ResolveRequest, ResolveResponse,
};
use spotfinder_geocode::GeocodeClient;
use spotfinder_serpapi::SerpApiClient;

use crate::error::ResolverError;
use crate::extract::{extract_events, extract_listing, ListingOutcome};
use crate::provider::{Geocoder, PlaceSearch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Sent with every search to bias results toward one city.
    pub location_bias: String,
    /// In-flight provider calls allowed per phase. Zero is treated as one.
    pub max_concurrent: usize,
}

impl From<&AppConfig> for ResolverSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            location_bias: config.operating_city.clone(),
            max_concurrent: config.max_concurrent_lookups,
        }
    }
}

/// Outcome of one phase-1 task. A skipped activity escalates its category
/// to the fallback pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityOutcome {
    Resolved(LocationRecord),
    Skipped(Category),
}

/// Result of phase 1: records in input order plus the categories that need
/// a fallback search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectPass {
    pub resolved: Vec<LocationRecord>,
    pub unresolved: BTreeSet<Category>,
}

pub struct Resolver<S, G> {
    search: S,
    geocoder: G,
    settings: ResolverSettings,
}

impl Resolver<SerpApiClient, GeocodeClient> {
    /// Builds a resolver backed by the HTTP clients described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] if either client cannot be constructed
    /// (bad base URL, TLS backend failure).
    pub fn from_config(config: &AppConfig) -> Result<Self, ResolverError> {
        let search = SerpApiClient::with_base_url(
            &config.serpapi_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.serpapi_base_url,
        )?
        .with_retries(config.max_retries, config.retry_backoff_base_ms);

        let geocoder = GeocodeClient::with_endpoint(
            &config.geocode_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.geocode_base_url,
        )?
        .with_retries(config.max_retries, config.retry_backoff_base_ms);

        Ok(Self::new(search, geocoder, ResolverSettings::from(config)))
    }
}

impl<S: PlaceSearch, G: Geocoder> Resolver<S, G> {
    pub fn new(search: S, geocoder: G, settings: ResolverSettings) -> Self {
        Self {
            search,
            geocoder,
            settings,
        }
    }

    fn concurrency(&self) -> usize {
        self.settings.max_concurrent.max(1)
    }

    /// Validates `request` and runs both phases over its activities.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if any of the three lists is
    /// absent. Provider failures never surface here.
    pub async fn resolve_request(
        &self,
        request: ResolveRequest,
    ) -> Result<ResolveResponse, CoreError> {
        let queries = request.into_queries()?;
        let results = self.resolve(&queries).await;
        Ok(ResolveResponse { results })
    }

    /// Runs the direct pass, then the fallback pass for every category that
    /// had at least one skip. Direct records come first, in input order.
    pub async fn resolve(&self, activities: &[ActivityQuery]) -> Vec<LocationRecord> {
        let DirectPass {
            mut resolved,
            unresolved,
        } = self.direct_pass(activities).await;

        tracing::info!(
            activities = activities.len(),
            resolved = resolved.len(),
            unresolved = ?unresolved,
            "direct pass complete"
        );

        if unresolved.is_empty() {
            return resolved;
        }

        let fallback = self.fallback_pass(&unresolved).await;
        tracing::info!(
            categories = unresolved.len(),
            records = fallback.len(),
            "fallback pass complete"
        );

        resolved.extend(fallback);
        resolved
    }

    /// Phase 1. Every activity is searched by name with at most
    /// `max_concurrent` searches in flight.
    pub async fn direct_pass(&self, activities: &[ActivityQuery]) -> DirectPass {
        let outcomes: Vec<ActivityOutcome> = stream::iter(activities)
            .map(|activity| self.resolve_activity(activity))
            .buffered(self.concurrency())
            .collect()
            .await;

        let mut pass = DirectPass::default();
        for outcome in outcomes {
            match outcome {
                ActivityOutcome::Resolved(record) => pass.resolved.push(record),
                ActivityOutcome::Skipped(category) => {
                    pass.unresolved.insert(category);
                }
            }
        }
        pass
    }

    /// Phase 2. One search per category, flattened in category order.
    pub async fn fallback_pass(&self, unresolved: &BTreeSet<Category>) -> Vec<LocationRecord> {
        let per_category: Vec<Vec<LocationRecord>> = stream::iter(unresolved.iter().copied())
            .map(|category| self.resolve_category(category))
            .buffered(self.concurrency())
            .collect()
            .await;

        per_category.into_iter().flatten().collect()
    }

    /// Searches one activity and extracts its listing. A search failure is
    /// a skip, same as a bundle without an address.
    pub async fn resolve_activity(&self, activity: &ActivityQuery) -> ActivityOutcome {
        let bundle = match self
            .search
            .search(&activity.name, &self.settings.location_bias)
            .await
        {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(
                    activity = %activity.name,
                    category = %activity.category,
                    error = %e,
                    "place search failed, skipping activity"
                );
                return ActivityOutcome::Skipped(activity.category);
            }
        };

        match extract_listing(&bundle, activity.category, activity.color, &self.geocoder).await {
            ListingOutcome::Resolved(record) => ActivityOutcome::Resolved(record),
            ListingOutcome::Skip(reason) => {
                tracing::debug!(
                    activity = %activity.name,
                    category = %activity.category,
                    %reason,
                    "activity not placed"
                );
                ActivityOutcome::Skipped(activity.category)
            }
        }
    }

    /// Searches `"<category> events"` and extracts every event that geocodes.
    pub async fn resolve_category(&self, category: Category) -> Vec<LocationRecord> {
        let query = category.fallback_query();
        let bundle = match self
            .search
            .search(&query, &self.settings.location_bias)
            .await
        {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(%category, error = %e, "fallback search failed");
                return Vec::new();
            }
        };

        extract_events(
            &bundle,
            category,
            category.color(),
            &self.geocoder,
            self.concurrency(),
        )
        .await
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
