use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurant,
    Music,
    Sports,
}

impl Category {
    /// Map marker color used by the front end for this category.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Category::Restaurant => Color::Red,
            Category::Music => Color::Blue,
            Category::Sports => Color::Orange,
        }
    }

    /// Query text for the category-level fallback search, e.g. `"sports events"`.
    #[must_use]
    pub fn fallback_query(self) -> String {
        format!("{self} events")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Restaurant => write!(f, "restaurant"),
            Category::Music => write!(f, "music"),
            Category::Sports => write!(f, "sports"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Orange,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
            Color::Orange => write!(f, "orange"),
        }
    }
}

/// One named activity to resolve, tagged with its category and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    pub name: String,
    pub category: Category,
    pub color: Color,
}

impl ActivityQuery {
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            color: category.color(),
        }
    }
}

/// A geolocated, display-ready activity.
///
/// Records leaving the pipeline always carry a non-empty `address` and
/// finite `lat`/`long`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub title: String,
    pub address: String,
    pub description: String,
    pub hours: String,
    pub lat: f64,
    pub long: f64,
    pub color: Color,
    pub category: Category,
}

/// Inbound payload: three lists of activity names.
///
/// All three fields are required; they are optional here only so that a
/// missing list surfaces as [`CoreError::InvalidInput`] instead of a
/// deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub restaurants: Option<Vec<String>>,
    #[serde(default)]
    pub musics: Option<Vec<String>>,
    #[serde(default)]
    pub sports: Option<Vec<String>>,
}

impl ResolveRequest {
    /// Tag every activity name with its category and flatten the lists in
    /// `restaurants, musics, sports` order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] naming each absent list.
    pub fn into_queries(self) -> Result<Vec<ActivityQuery>, CoreError> {
        let mut missing = Vec::new();
        if self.restaurants.is_none() {
            missing.push("restaurants");
        }
        if self.musics.is_none() {
            missing.push("musics");
        }
        if self.sports.is_none() {
            missing.push("sports");
        }
        if !missing.is_empty() {
            return Err(CoreError::InvalidInput { missing });
        }

        let lists = [
            (Category::Restaurant, self.restaurants),
            (Category::Music, self.musics),
            (Category::Sports, self.sports),
        ];

        Ok(lists
            .into_iter()
            .flat_map(|(category, names)| {
                names
                    .unwrap_or_default()
                    .into_iter()
                    .map(move |name| ActivityQuery::new(name, category))
            })
            .collect())
    }
}

/// Outbound payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub results: Vec<LocationRecord>,
}
