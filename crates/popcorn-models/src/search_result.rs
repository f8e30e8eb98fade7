use serde::{Deserialize, Serialize};

/// One row of a title search. Lives only until the next successful query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub year: String, // Series come back as ranges, e.g. "2008–2013"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}
