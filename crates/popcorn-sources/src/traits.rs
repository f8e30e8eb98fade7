use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResult};

use crate::error::SourceError;

/// A read-only movie metadata provider.
#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Title search. An empty match set is reported as `SourceError::NotFound`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;

    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}
