//! In-memory provider fakes for unit tests.

use std::collections::HashMap;
use std::future::{ready, Future};
use std::sync::Mutex;

use spotfinder_core::Coordinates;
use spotfinder_geocode::GeocodeError;
use spotfinder_serpapi::{SearchBundle, SerpApiError};

use crate::provider::{Geocoder, PlaceSearch};

pub(crate) fn bundle(value: serde_json::Value) -> SearchBundle {
    serde_json::from_value(value).expect("fixture bundle should deserialize")
}

#[derive(Clone, Copy)]
pub(crate) enum Answer {
    Found(f64, f64),
    NotFound,
    Unavailable,
}

/// Geocoder answering from a fixed table; unknown addresses are not found.
#[derive(Default)]
pub(crate) struct FakeGeocoder {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub(crate) fn with(mut self, address: &str, answer: Answer) -> Self {
        self.answers.insert(address.to_string(), answer);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinates>, GeocodeError>> + Send {
        self.calls
            .lock()
            .expect("calls lock")
            .push(address.to_string());
        let result = match self.answers.get(address).copied() {
            Some(Answer::Found(lat, long)) => Ok(Coordinates::new(lat, long)),
            Some(Answer::NotFound) | None => Ok(None),
            Some(Answer::Unavailable) => Err(GeocodeError::Api {
                status: "UNKNOWN_ERROR".to_string(),
                message: "backend unavailable".to_string(),
            }),
        };
        ready(result)
    }
}

/// Search provider answering from a fixed table; unknown queries fail.
#[derive(Default)]
pub(crate) struct FakeSearch {
    bundles: HashMap<String, serde_json::Value>,
    queries: Mutex<Vec<(String, String)>>,
}

impl FakeSearch {
    pub(crate) fn with(mut self, query: &str, bundle: serde_json::Value) -> Self {
        self.bundles.insert(query.to_string(), bundle);
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .expect("queries lock")
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    pub(crate) fn locations(&self) -> Vec<String> {
        self.queries
            .lock()
            .expect("queries lock")
            .iter()
            .map(|(_, l)| l.clone())
            .collect()
    }
}

impl PlaceSearch for FakeSearch {
    fn search(
        &self,
        query: &str,
        location: &str,
    ) -> impl Future<Output = Result<SearchBundle, SerpApiError>> + Send {
        self.queries
            .lock()
            .expect("queries lock")
            .push((query.to_string(), location.to_string()));
        let result = match self.bundles.get(query) {
            Some(value) => Ok(bundle(value.clone())),
            None => Err(SerpApiError::Api(format!("no fixture for '{query}'"))),
        };
        ready(result)
    }
}
