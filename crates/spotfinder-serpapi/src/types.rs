//! `SerpApi` response types.
//!
//! A Google search result can carry any combination of a local-business
//! pack, a knowledge panel and an events carousel. Each sub-shape is
//! deserialized leniently: if the provider sends a shape we do not
//! recognise, that part is treated as absent instead of failing the whole
//! bundle.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use spotfinder_core::Coordinates;

/// The loosely-structured result of one search query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchBundle {
    #[serde(default, deserialize_with = "lenient")]
    pub local_results: Option<LocalResults>,
    #[serde(default, deserialize_with = "lenient")]
    pub local_map: Option<LocalMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub events_results: Vec<EventResult>,
    /// Provider-level error message, if any.
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
}

impl SearchBundle {
    /// The first place of the local-business pack.
    #[must_use]
    pub fn local_listing(&self) -> Option<&LocalPlace> {
        self.local_results.as_ref()?.places.first()
    }

    #[must_use]
    pub fn knowledge_entity(&self) -> Option<&KnowledgeGraph> {
        self.knowledge_graph.as_ref()
    }

    #[must_use]
    pub fn events(&self) -> &[EventResult] {
        &self.events_results
    }

    /// Coordinates of the map that accompanies the local pack, when both
    /// components parse as finite numbers.
    #[must_use]
    pub fn map_coordinates(&self) -> Option<Coordinates> {
        let gps = self.local_map.as_ref()?.gps_coordinates.as_ref()?;
        Coordinates::from_values(&gps.latitude, &gps.longitude)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalResults {
    #[serde(default, deserialize_with = "lenient_list")]
    pub places: Vec<LocalPlace>,
}

/// A local business card.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalPlace {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalMap {
    #[serde(default, deserialize_with = "lenient")]
    pub gps_coordinates: Option<GpsCoordinates>,
}

/// Raw map coordinates; the provider sends numbers but strings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpsCoordinates {
    #[serde(default)]
    pub latitude: serde_json::Value,
    #[serde(default)]
    pub longitude: serde_json::Value,
}

/// A knowledge-panel entity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hours: Option<String>,
}

/// One entry of the events carousel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub address: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<EventDate>,
}

impl EventResult {
    /// The first two address lines joined by a single space.
    #[must_use]
    pub fn address_text(&self) -> String {
        self.address
            .iter()
            .take(2)
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `"<start_date> <when>"`, omitting whichever part is missing.
    #[must_use]
    pub fn hours_text(&self) -> String {
        let Some(date) = &self.date else {
            return String::new();
        };
        format!(
            "{} {}",
            date.start_date.as_deref().unwrap_or_default(),
            date.when.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDate {
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub when: Option<String>,
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Keeps the well-formed elements of an array and drops the rest.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(display_text))
}

/// Address lines arrive as an array of strings; a bare string is one line.
fn lenient_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => {
            items.iter().filter_map(display_text).collect()
        }
        Some(other) => display_text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Renders a loosely-typed provider value as display text.
///
/// Per-day opening hours (`{"monday": {"opens": "9 AM", "closes": "5 PM"}}`)
/// become `"monday: 9 AM-5 PM"` segments in weekday order joined by `"; "`.
fn display_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
            entries.sort_by_key(|(key, _)| {
                WEEKDAYS
                    .iter()
                    .position(|day| key.eq_ignore_ascii_case(day))
                    .unwrap_or(WEEKDAYS.len())
            });
            let parts: Vec<String> = entries
                .into_iter()
                .filter_map(|(key, v)| {
                    let rendered = match (v.get("opens"), v.get("closes")) {
                        (Some(opens), Some(closes)) => {
                            format!("{}-{}", display_text(opens)?, display_text(closes)?)
                        }
                        _ => display_text(v)?,
                    };
                    Some(format!("{key}: {rendered}"))
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
    }
}
