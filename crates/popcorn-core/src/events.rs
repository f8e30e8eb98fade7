use popcorn_models::{MovieDetail, SearchResult};
use popcorn_sources::SourceError;

use crate::request::RequestId;

/// Everything that can change controller state.
///
/// Front ends send user input; spawned fetches send completions.
#[derive(Debug)]
pub enum Event {
    QueryChanged(String),
    /// `Some(id)` toggles that movie, `None` closes the detail pane
    SelectionChanged(Option<String>),
    RatingHovered(u8),
    RatingLeft,
    RatingClicked(u8),
    EntryCommitted,
    EntryDeleted(String),
    SearchCompleted {
        request: RequestId,
        outcome: Result<Vec<SearchResult>, SourceError>,
    },
    DetailCompleted {
        request: RequestId,
        outcome: Result<MovieDetail, SourceError>,
    },
}
