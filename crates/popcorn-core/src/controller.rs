use std::future::Future;
use std::sync::Arc;

use popcorn_config::Config;
use popcorn_models::{MovieDetail, SearchResult, SessionStatus, WatchSummary};
use popcorn_sources::{MovieSource, SourceError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::detail::{DetailRequest, DetailSession};
use crate::error::CoreError;
use crate::events::Event;
use crate::rating::RatingInput;
use crate::request::{FetchTicket, RequestId};
use crate::search::{SearchRequest, SearchSession};
use crate::selection::Selection;
use crate::watch_list::WatchList;

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub min_query_len: usize,
    pub max_rating: u8,
    pub app_title: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            min_query_len: config.search.min_query_len,
            max_rating: config.ui.max_rating,
            app_title: config.ui.app_title.clone(),
        }
    }
}

/// Owns the canonical application state and applies events to it one at a
/// time.
///
/// Fetches run as spawned tasks that report back through the controller's
/// own event channel, so `handle` must be called inside a tokio runtime.
pub struct Controller<S> {
    source: Arc<S>,
    options: ControllerOptions,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    search: SearchSession,
    detail: DetailSession,
    watched: WatchList,
    selection: Selection,
}

impl<S> Controller<S>
where
    S: MovieSource + 'static,
{
    pub fn new(source: S, options: ControllerOptions) -> Self {
        Self::with_shared_source(Arc::new(source), options)
    }

    pub fn with_shared_source(source: Arc<S>, options: ControllerOptions) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            source,
            search: SearchSession::new(options.min_query_len),
            detail: DetailSession::new(options.max_rating),
            options,
            events_tx,
            events_rx,
            watched: WatchList::new(),
            selection: Selection::new(),
        }
    }

    /// Channel for feeding events from elsewhere (another task, a UI thread).
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    pub fn handle(&mut self, event: Event) -> Result<(), CoreError> {
        match event {
            Event::QueryChanged(query) => {
                if let Some(request) = self.search.set_query(query) {
                    self.spawn_search(request);
                }
            }
            Event::SelectionChanged(Some(imdb_id)) => {
                let selected = self.selection.toggle(imdb_id).map(str::to_owned);
                self.open_detail(selected);
            }
            Event::SelectionChanged(None) => {
                self.selection.clear();
                self.open_detail(None);
            }
            Event::RatingHovered(position) => self.detail.hover_rating(position),
            Event::RatingLeft => self.detail.leave_rating(),
            Event::RatingClicked(position) => {
                if let Some(rating) = self.detail.click_rating(position) {
                    debug!(rating, "Pending rating changed");
                }
            }
            Event::EntryCommitted => {
                let entry = self.detail.commit()?;
                info!(imdb_id = %entry.imdb_id, title = %entry.title, rating = entry.user_rating, "Added to watched list");
                self.watched.upsert(entry);
                self.selection.clear();
                self.open_detail(None);
            }
            Event::EntryDeleted(imdb_id) => {
                if let Some(removed) = self.watched.remove(&imdb_id) {
                    info!(imdb_id = %removed.imdb_id, title = %removed.title, "Removed from watched list");
                    self.detail.sync_with_watch_list(&self.watched);
                }
            }
            Event::SearchCompleted { request, outcome } => {
                self.search.complete(request, outcome);
            }
            Event::DetailCompleted { request, outcome } => {
                self.detail.complete(request, outcome);
            }
        }
        Ok(())
    }

    /// True while either session waits on the network.
    pub fn is_busy(&self) -> bool {
        self.search.is_loading() || self.detail.is_loading()
    }

    /// Apply incoming events until the queue is empty and no fetch is
    /// outstanding.
    pub async fn settle(&mut self) -> Result<(), CoreError> {
        loop {
            self.drain()?;
            if !self.is_busy() {
                return Ok(());
            }
            match self.events_rx.recv().await {
                Some(event) => self.handle(event)?,
                None => return Ok(()),
            }
        }
    }

    /// Apply queued events without waiting.
    pub fn drain(&mut self) -> Result<(), CoreError> {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle(event)?;
        }
        Ok(())
    }

    fn open_detail(&mut self, imdb_id: Option<String>) {
        if let Some(request) = self.detail.select(imdb_id, &self.watched) {
            self.spawn_detail(request);
        }
    }

    fn spawn_search(&self, request: SearchRequest) {
        let SearchRequest { ticket, query } = request;
        let source = Arc::clone(&self.source);
        spawn_fetch(
            ticket,
            "Search",
            self.events_tx.clone(),
            async move { source.search(&query).await },
            |request, outcome| Event::SearchCompleted { request, outcome },
        );
    }

    fn spawn_detail(&self, request: DetailRequest) {
        let DetailRequest { ticket, imdb_id } = request;
        let source = Arc::clone(&self.source);
        spawn_fetch(
            ticket,
            "Detail fetch",
            self.events_tx.clone(),
            async move { source.movie_details(&imdb_id).await },
            |request, outcome| Event::DetailCompleted { request, outcome },
        );
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn results(&self) -> &[SearchResult] {
        self.search.results()
    }

    pub fn search_status(&self) -> &SessionStatus {
        self.search.status()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.current()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.detail()
    }

    pub fn detail_status(&self) -> &SessionStatus {
        self.detail.status()
    }

    pub fn rating_input(&self) -> &RatingInput {
        self.detail.rating_input()
    }

    pub fn pending_rating(&self) -> u8 {
        self.detail.pending_rating()
    }

    pub fn watched(&self) -> &WatchList {
        &self.watched
    }

    pub fn summary(&self) -> WatchSummary {
        self.watched.summary()
    }

    pub fn window_title(&self) -> String {
        self.detail.window_title(&self.options.app_title)
    }
}

/// Run `fetch` on its own task and report the outcome as an event, unless
/// the ticket is cancelled first. A fetch that panics still reports back, as
/// a `TaskFailed` error, so the session always leaves `Loading`.
fn spawn_fetch<T, F>(
    ticket: FetchTicket,
    label: &'static str,
    events: mpsc::UnboundedSender<Event>,
    fetch: F,
    completed: fn(RequestId, Result<T, SourceError>) -> Event,
) where
    T: Send + 'static,
    F: Future<Output = Result<T, SourceError>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut task = tokio::spawn(fetch);
        tokio::select! {
            biased;
            _ = ticket.token.cancelled() => {
                task.abort();
                debug!(request = %ticket.id, "{} cancelled", label);
            }
            joined = &mut task => {
                let outcome = joined.unwrap_or_else(|e| {
                    warn!(request = %ticket.id, "{} task failed: {}", label, e);
                    Err(SourceError::TaskFailed(e.to_string()))
                });
                // Send fails only once the controller is gone
                let _ = events.send(completed(ticket.id, outcome));
            }
        }
    });
}

impl<S> std::fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("options", &self.options)
            .field("search", &self.search)
            .field("detail", &self.detail)
            .field("watched", &self.watched)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
