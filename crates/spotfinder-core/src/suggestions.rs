//! Extraction of activity lists from generated suggestion text.
//!
//! The suggestion generator answers with headed, numbered lists:
//!
//! ```text
//! Restaurants:
//! 1. Pizza Place
//! 2. Taco Spot
//!
//! Sports Events:
//! 1. Local 5k
//! ```
//!
//! Each list runs from the line after `<Header>:` to the next blank line or
//! the end of the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::activity::ResolveRequest;

pub const RESTAURANTS_HEADER: &str = "Restaurants";
pub const SPORTS_HEADER: &str = "Sports Events";
pub const MUSIC_HEADER: &str = "Music Concerts";

static NUMBERING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid numbering regex"));

/// Returns the items listed under `header`, with list numbering stripped.
///
/// A missing header yields an empty list.
#[must_use]
pub fn extract_activities(header: &str, text: &str) -> Vec<String> {
    let pattern = format!(r"(?s){}:\n(.*?)(\n\n|$)", regex::escape(header));
    let Ok(section_re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let Some(body) = section_re.captures(text).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    body.as_str()
        .trim()
        .split('\n')
        .map(|line| NUMBERING_RE.replace(line.trim(), "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Builds a complete [`ResolveRequest`] from suggestion text.
#[must_use]
pub fn parse_suggestions(text: &str) -> ResolveRequest {
    let text = text.replace("\r\n", "\n");
    ResolveRequest {
        restaurants: Some(extract_activities(RESTAURANTS_HEADER, &text)),
        musics: Some(extract_activities(MUSIC_HEADER, &text)),
        sports: Some(extract_activities(SPORTS_HEADER, &text)),
    }
}
