use popcorn_models::{MovieDetail, SessionStatus, WatchedEntry};
use popcorn_sources::SourceError;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::rating::RatingInput;
use crate::request::{FetchTicket, RequestId, RequestTracker};
use crate::watch_list::WatchList;

pub const DETAIL_FAILED_MESSAGE: &str = "Could not load movie details";

/// A detail fetch the caller should run against the provider.
#[derive(Debug, Clone)]
pub struct DetailRequest {
    pub ticket: FetchTicket,
    pub imdb_id: String,
}

/// Details of the selected movie plus the rating the user is about to commit.
#[derive(Debug)]
pub struct DetailSession {
    selected: Option<String>,
    detail: Option<MovieDetail>,
    status: SessionStatus,
    rating_input: RatingInput,
    pending_rating: u8,
    requests: RequestTracker,
}

impl DetailSession {
    pub fn new(max_rating: u8) -> Self {
        Self {
            selected: None,
            detail: None,
            status: SessionStatus::Idle,
            rating_input: RatingInput::new(max_rating),
            pending_rating: 0,
            requests: RequestTracker::new(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn rating_input(&self) -> &RatingInput {
        &self.rating_input
    }

    /// Rating that `commit` will record.
    pub fn pending_rating(&self) -> u8 {
        self.pending_rating
    }

    /// Switch to another movie, or to none.
    ///
    /// Cancels the fetch for the previous movie and returns the fetch for
    /// the new one.
    pub fn select(&mut self, imdb_id: Option<String>, watched: &WatchList) -> Option<DetailRequest> {
        if self.requests.cancel() {
            debug!("Superseded in-flight detail fetch");
        }
        self.detail = None;
        self.selected = imdb_id;
        self.sync_with_watch_list(watched);

        let Some(imdb_id) = self.selected.clone() else {
            self.status = SessionStatus::Idle;
            return None;
        };

        self.status = SessionStatus::Loading;
        let ticket = self.requests.begin();
        debug!(request = %ticket.id, %imdb_id, "Loading movie details");
        Some(DetailRequest { ticket, imdb_id })
    }

    /// Re-seed the pending rating from the watched list: the stored rating
    /// if this movie was already rated, otherwise 0.
    pub fn sync_with_watch_list(&mut self, watched: &WatchList) {
        let stored = self
            .selected
            .as_deref()
            .and_then(|id| watched.get(id))
            .map(|entry| entry.user_rating)
            .unwrap_or(0);

        self.pending_rating = stored;
        self.rating_input = RatingInput::with_default(self.rating_input.max_rating(), stored);
    }

    /// Apply a fetch outcome. Stale completions are dropped and reported as
    /// `false`.
    pub fn complete(&mut self, id: RequestId, outcome: Result<MovieDetail, SourceError>) -> bool {
        if !self.requests.finish(id) {
            debug!(request = %id, "Ignoring stale movie details");
            return false;
        }

        match outcome {
            Ok(detail) => {
                debug!(request = %id, title = %detail.title, "Movie details loaded");
                self.detail = Some(detail);
                self.status = SessionStatus::Idle;
            }
            Err(e) => {
                warn!(request = %id, imdb_id = ?self.selected, "Failed to load movie details: {}", e);
                self.detail = None;
                self.status = SessionStatus::Error(DETAIL_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn hover_rating(&mut self, position: u8) {
        self.rating_input.hover(position);
    }

    pub fn leave_rating(&mut self) {
        self.rating_input.leave();
    }

    /// Click a star. The committed value becomes the pending rating.
    pub fn click_rating(&mut self, position: u8) -> Option<u8> {
        let committed = self.rating_input.click(position)?;
        self.pending_rating = committed;
        Some(committed)
    }

    /// Build the watched entry for the loaded movie and the pending rating.
    ///
    /// The watched list itself is left untouched; the caller upserts the
    /// entry and clears the selection.
    pub fn commit(&self) -> Result<WatchedEntry, CoreError> {
        let imdb_id = self.selected.as_deref().ok_or(CoreError::NothingSelected)?;
        let detail = self.detail.as_ref().ok_or(CoreError::DetailNotLoaded)?;
        if self.pending_rating == 0 {
            return Err(CoreError::Unrated);
        }
        Ok(WatchedEntry::from_detail(imdb_id, detail, self.pending_rating))
    }

    /// Window title for the current state. Falls back to `default_title`
    /// whenever no detail is loaded.
    pub fn window_title(&self, default_title: &str) -> String {
        match &self.detail {
            Some(detail) if !detail.title.is_empty() => format!("Movie | {}", detail.title),
            _ => default_title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_detail(imdb_id: &str, title: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster_url: None,
            runtime: "148 min".to_string(),
            external_rating: Some(8.8),
            plot: "A thief who steals corporate secrets.".to_string(),
            released: "16 Jul 2010".to_string(),
            actors: "Leonardo DiCaprio".to_string(),
            director: "Christopher Nolan".to_string(),
            genre: "Sci-Fi".to_string(),
        }
    }

    fn watched_with(imdb_id: &str, user_rating: u8) -> WatchList {
        let mut list = WatchList::new();
        list.upsert(WatchedEntry {
            imdb_id: imdb_id.to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: None,
            external_rating: Some(8.8),
            runtime_minutes: Some(148),
            user_rating,
            rated_at: Utc::now(),
        });
        list
    }

    #[test]
    fn test_select_starts_fetch() {
        let mut session = DetailSession::new(10);
        let request = session.select(Some("tt1375666".to_string()), &WatchList::new()).unwrap();
        assert_eq!(request.imdb_id, "tt1375666");
        assert!(session.is_loading());
        assert_eq!(session.pending_rating(), 0);
    }

    #[test]
    fn test_select_none_is_idle() {
        let mut session = DetailSession::new(10);
        let request = session.select(Some("tt1375666".to_string()), &WatchList::new()).unwrap();
        assert!(session.select(None, &WatchList::new()).is_none());
        assert!(request.ticket.is_cancelled());
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert!(session.detail().is_none());
    }

    #[test]
    fn test_already_watched_seeds_rating() {
        let watched = watched_with("tt1375666", 7);
        let mut session = DetailSession::new(10);
        session.select(Some("tt1375666".to_string()), &watched);

        assert_eq!(session.pending_rating(), 7);
        assert_eq!(session.rating_input().rating(), 7);
        assert!(session.rating_input().is_clicked());
    }

    #[test]
    fn test_watch_list_change_reseeds_rating() {
        let mut watched = watched_with("tt1375666", 7);
        let mut session = DetailSession::new(10);
        session.select(Some("tt1375666".to_string()), &watched);

        watched.remove("tt1375666");
        session.sync_with_watch_list(&watched);
        assert_eq!(session.pending_rating(), 0);
        assert!(!session.rating_input().is_clicked());
    }

    #[test]
    fn test_stale_detail_is_ignored() {
        let mut session = DetailSession::new(10);
        let first = session.select(Some("tt1375666".to_string()), &WatchList::new()).unwrap();
        let second = session.select(Some("tt0816692".to_string()), &WatchList::new()).unwrap();

        assert!(!session.complete(first.ticket.id, Ok(create_detail("tt1375666", "Inception"))));
        assert!(session.detail().is_none());

        assert!(session.complete(second.ticket.id, Ok(create_detail("tt0816692", "Interstellar"))));
        assert_eq!(session.detail().unwrap().title, "Interstellar");
    }

    #[test]
    fn test_fetch_failure_surfaces_error() {
        let mut session = DetailSession::new(10);
        let request = session.select(Some("tt1375666".to_string()), &WatchList::new()).unwrap();
        session.complete(request.ticket.id, Err(SourceError::Status { status: 502 }));

        assert_eq!(session.status().error(), Some(DETAIL_FAILED_MESSAGE));
        assert!(session.detail().is_none());
        assert_eq!(session.window_title("usePopcorn"), "usePopcorn");
    }

    #[test]
    fn test_commit_builds_entry() {
        let mut session = DetailSession::new(10);
        let request = session.select(Some("tt1375666".to_string()), &WatchList::new()).unwrap();
        session.complete(request.ticket.id, Ok(create_detail("tt1375666", "Inception")));

        assert_eq!(session.commit(), Err(CoreError::Unrated));

        assert_eq!(session.click_rating(9), Some(9));
        let entry = session.commit().unwrap();
        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.runtime_minutes, Some(148));
        assert_eq!(entry.external_rating, Some(8.8));
    }

    #[test]
    fn test_commit_keys_entry_by_selected_id() {
        let mut session = DetailSession::new(10);
        let request = session.select(Some("tt0113277".to_string()), &WatchList::new()).unwrap();
        // Provider response without imdbID
        session.complete(request.ticket.id, Ok(create_detail("", "Heat")));
        session.click_rating(8);

        let mut watched = WatchList::new();
        watched.upsert(session.commit().unwrap());
        assert!(watched.get("tt0113277").is_some());

        session.select(Some("tt0113277".to_string()), &watched);
        assert_eq!(session.pending_rating(), 8);
    }

    #[test]
    fn test_commit_requires_selection_and_detail() {
        let mut session = DetailSession::new(10);
        assert_eq!(session.commit(), Err(CoreError::NothingSelected));

        session.select(Some("tt1375666".to_string()), &WatchList::new());
        session.click_rating(5);
        assert_eq!(session.commit(), Err(CoreError::DetailNotLoaded));
    }

    #[test]
    fn test_unclicking_rating_clears_pending() {
        let mut session = DetailSession::new(10);
        session.select(Some("tt1375666".to_string()), &WatchList::new());
        session.click_rating(6);
        assert_eq!(session.click_rating(6), Some(0));
        assert_eq!(session.pending_rating(), 0);
    }

    #[test]
    fn test_window_title_follows_detail() {
        let mut session = DetailSession::new(10);
        assert_eq!(session.window_title("usePopcorn"), "usePopcorn");

        let request = session.select(Some("tt1375666".to_string()), &WatchList::new()).unwrap();
        assert_eq!(session.window_title("usePopcorn"), "usePopcorn");

        session.complete(request.ticket.id, Ok(create_detail("tt1375666", "Inception")));
        assert_eq!(session.window_title("usePopcorn"), "Movie | Inception");

        session.select(Some("tt0816692".to_string()), &WatchList::new());
        assert_eq!(session.window_title("usePopcorn"), "usePopcorn");
    }
}
