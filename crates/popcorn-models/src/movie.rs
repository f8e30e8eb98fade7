use serde::{Deserialize, Serialize};

/// Full metadata for a single title, fetched fresh on every selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Runtime as reported by the provider, e.g. "148 min"
    pub runtime: String,
    /// Provider rating on a 0-10 scale, absent when the provider has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_rating: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    pub fn runtime_minutes(&self) -> Option<u32> {
        parse_runtime_minutes(&self.runtime)
    }
}

/// Parse the leading integer token of a runtime string ("148 min" -> 148).
pub fn parse_runtime_minutes(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}
