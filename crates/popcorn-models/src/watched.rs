use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::MovieDetail;

/// A movie the user has rated. Keyed by `imdb_id`; the watched list never
/// holds two entries with the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    pub user_rating: u8, // 0-10
    pub rated_at: DateTime<Utc>,
}

impl WatchedEntry {
    /// `imdb_id` is the id the movie was selected under, which stays the key
    /// even when the provider leaves `imdbID` out of the detail.
    pub fn from_detail(imdb_id: impl Into<String>, detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            external_rating: detail.external_rating,
            runtime_minutes: detail.runtime_minutes(),
            user_rating,
            rated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detail_parses_runtime() {
        let detail = MovieDetail {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: None,
            runtime: "148 min".to_string(),
            external_rating: Some(8.8),
            plot: String::new(),
            released: "16 Jul 2010".to_string(),
            actors: String::new(),
            director: "Christopher Nolan".to_string(),
            genre: "Action, Sci-Fi".to_string(),
        };

        let entry = WatchedEntry::from_detail("tt1375666", &detail, 9);
        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.runtime_minutes, Some(148));
        assert_eq!(entry.external_rating, Some(8.8));
        assert_eq!(entry.user_rating, 9);
    }

    #[test]
    fn test_from_detail_keys_by_selected_id() {
        let detail = MovieDetail {
            imdb_id: String::new(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster_url: None,
            runtime: "N/A".to_string(),
            external_rating: None,
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        };

        let entry = WatchedEntry::from_detail("tt0113277", &detail, 8);
        assert_eq!(entry.imdb_id, "tt0113277");
        assert_eq!(entry.runtime_minutes, None);
    }

    #[test]
    fn test_serialization_skips_missing_values() {
        let entry = WatchedEntry {
            imdb_id: "tt0000001".to_string(),
            title: "Unknown".to_string(),
            year: "1999".to_string(),
            poster_url: None,
            external_rating: None,
            runtime_minutes: None,
            user_rating: 5,
            rated_at: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("external_rating").is_none());
        assert!(json.get("runtime_minutes").is_none());
        assert_eq!(json["user_rating"], 5);
    }
}
