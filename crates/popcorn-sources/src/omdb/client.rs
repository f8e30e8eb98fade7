use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;
use async_trait::async_trait;
use popcorn_config::{OmdbConfig, DEFAULT_OMDB_BASE_URL};
use popcorn_models::{MovieDetail, SearchResult};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Arc::new(api::create_omdb_client()),
            base_url: DEFAULT_OMDB_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a client from configuration. A missing or blank key is an error.
    pub fn from_config(config: &OmdbConfig, api_key: Option<String>) -> Result<Self, SourceError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(SourceError::MissingApiKey)?;
        Ok(Self::new(api_key).with_base_url(config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        api::search_movies(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        api::get_movie_details(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_api_key() {
        let config = OmdbConfig::default();
        assert!(matches!(
            OmdbClient::from_config(&config, None),
            Err(SourceError::MissingApiKey)
        ));
        assert!(matches!(
            OmdbClient::from_config(&config, Some("   ".to_string())),
            Err(SourceError::MissingApiKey)
        ));
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = OmdbConfig {
            base_url: "http://localhost:9999/".to_string(),
        };
        let client = OmdbClient::from_config(&config, Some("key".to_string())).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/");
        assert_eq!(client.source_name(), "omdb");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OmdbClient::new("super-secret");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("super-secret"));
    }
}
