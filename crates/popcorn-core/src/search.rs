use popcorn_models::{SearchResult, SessionStatus};
use popcorn_sources::SourceError;
use tracing::{debug, warn};

use crate::request::{FetchTicket, RequestId, RequestTracker};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong with fetching the movies";

/// A search the caller should run against the provider.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ticket: FetchTicket,
    pub query: String,
}

/// Query text, its results and the status of the latest search.
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    results: Vec<SearchResult>,
    status: SessionStatus,
    min_query_len: usize,
    requests: RequestTracker,
}

impl SearchSession {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            status: SessionStatus::Idle,
            min_query_len,
            requests: RequestTracker::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.requests.in_flight()
    }

    /// Track new query text.
    ///
    /// Any search still in flight is cancelled. Returns the request to run,
    /// or `None` when the query is too short to search.
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SearchRequest> {
        self.query = text.into();
        if self.requests.cancel() {
            debug!("Superseded in-flight search");
        }

        if self.query.chars().count() < self.min_query_len {
            self.status = SessionStatus::Idle;
            self.results.clear();
            return None;
        }

        self.status = SessionStatus::Loading;
        let ticket = self.requests.begin();
        debug!(request = %ticket.id, query = %self.query, "Starting search");
        Some(SearchRequest {
            ticket,
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a search. Stale completions are dropped and
    /// reported as `false`.
    pub fn complete(&mut self, id: RequestId, outcome: Result<Vec<SearchResult>, SourceError>) -> bool {
        if !self.requests.finish(id) {
            debug!(request = %id, "Ignoring stale search result");
            return false;
        }

        match outcome {
            Ok(results) => {
                debug!(request = %id, count = results.len(), "Search completed");
                self.results = results;
                self.status = SessionStatus::Idle;
            }
            Err(SourceError::NotFound(reason)) => {
                debug!(request = %id, %reason, "No movies matched");
                self.status = SessionStatus::Error(NOT_FOUND_MESSAGE.to_string());
            }
            Err(e) => {
                warn!(request = %id, query = %self.query, "Search failed: {}", e);
                self.status = SessionStatus::Error(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_result(imdb_id: &str, title: &str) -> SearchResult {
        SearchResult {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster_url: None,
        }
    }

    #[test]
    fn test_short_query_does_not_search() {
        let mut session = SearchSession::new(3);
        assert!(session.set_query("").is_none());
        assert!(session.set_query("in").is_none());
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert!(session.results().is_empty());
        assert_eq!(session.in_flight(), None);
    }

    #[test]
    fn test_query_length_counts_characters() {
        let mut session = SearchSession::new(3);
        // Three characters, six bytes
        assert!(session.set_query("été").is_some());
    }

    #[test]
    fn test_search_success_replaces_results() {
        let mut session = SearchSession::new(3);
        let request = session.set_query("inception").unwrap();
        assert_eq!(request.query, "inception");
        assert!(session.is_loading());

        assert!(session.complete(request.ticket.id, Ok(vec![create_result("tt1375666", "Inception")])));
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert_eq!(session.results().len(), 1);

        let request = session.set_query("interstellar").unwrap();
        session.complete(request.ticket.id, Ok(vec![create_result("tt0816692", "Interstellar")]));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].imdb_id, "tt0816692");
    }

    #[test]
    fn test_latest_query_wins() {
        let mut session = SearchSession::new(3);
        let first = session.set_query("star").unwrap();
        let second = session.set_query("star wars").unwrap();
        assert!(first.ticket.is_cancelled());

        assert!(session.complete(second.ticket.id, Ok(vec![create_result("tt0076759", "Star Wars")])));
        assert!(!session.complete(first.ticket.id, Ok(vec![create_result("tt0000001", "Star")])));

        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].title, "Star Wars");
        assert_eq!(session.status(), &SessionStatus::Idle);
    }

    #[test]
    fn test_stale_result_while_loading_keeps_loading() {
        let mut session = SearchSession::new(3);
        let first = session.set_query("star").unwrap();
        let _second = session.set_query("star trek").unwrap();

        assert!(!session.complete(first.ticket.id, Ok(vec![create_result("tt0000001", "Star")])));
        assert!(session.is_loading());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_not_found_keeps_previous_results() {
        let mut session = SearchSession::new(3);
        let request = session.set_query("matrix").unwrap();
        session.complete(request.ticket.id, Ok(vec![create_result("tt0133093", "The Matrix")]));

        let request = session.set_query("matrixxx").unwrap();
        session.complete(request.ticket.id, Err(SourceError::NotFound("Movie not found!".to_string())));

        assert_eq!(session.status(), &SessionStatus::Error(NOT_FOUND_MESSAGE.to_string()));
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_transport_failure_is_generic_error() {
        let mut session = SearchSession::new(3);
        let request = session.set_query("matrix").unwrap();
        session.complete(request.ticket.id, Err(SourceError::Status { status: 500 }));

        assert_eq!(session.status().error(), Some(FETCH_FAILED_MESSAGE));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_shortening_query_cancels_and_clears() {
        let mut session = SearchSession::new(3);
        let request = session.set_query("matrix").unwrap();
        session.complete(request.ticket.id, Err(SourceError::Status { status: 500 }));

        let request = session.set_query("matrix r").unwrap();
        assert!(session.set_query("ma").is_none());
        assert!(request.ticket.is_cancelled());
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert!(session.results().is_empty());
        assert!(!session.complete(request.ticket.id, Ok(vec![create_result("tt0242653", "The Matrix Revolutions")])));
        assert!(session.results().is_empty());
    }
}
