use crate::error::SourceError;
use popcorn_models::{MovieDetail, SearchResult};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

/// Placeholder OMDb uses for every missing value
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

impl From<OmdbSearchItem> for SearchResult {
    fn from(item: OmdbSearchItem) -> Self {
        SearchResult {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: available(item.poster),
        }
    }
}

impl From<OmdbMovie> for MovieDetail {
    fn from(movie: OmdbMovie) -> Self {
        MovieDetail {
            external_rating: movie.imdb_rating.trim().parse().ok(),
            imdb_id: movie.imdb_id,
            title: movie.title,
            year: movie.year,
            poster_url: available(movie.poster),
            runtime: movie.runtime,
            plot: movie.plot,
            released: movie.released,
            actors: movie.actors,
            director: movie.director,
            genre: movie.genre,
        }
    }
}

fn available(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}

fn is_true(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

pub fn create_omdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client, using defaults: {}", e);
            Client::new()
        })
}

/// Turn a non-2xx response into `SourceError::Status`, otherwise return the body.
async fn read_body(response: Response) -> Result<String, SourceError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %error_text, "OMDb request failed");
        return Err(SourceError::Status { status: status.as_u16() });
    }
    Ok(response.text().await?)
}

/// Search titles: `GET {base_url}?s={query}&apikey={key}`
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    debug!(query, "Searching OMDb");

    let response = client
        .get(base_url)
        .query(&[("s", query), ("apikey", api_key)])
        .header("Accept", "application/json")
        .send()
        .await?;

    let body = read_body(response).await?;
    parse_search_response(&body)
}

/// Fetch one title: `GET {base_url}?i={imdb_id}&apikey={key}`
pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, SourceError> {
    debug!(imdb_id, "Fetching OMDb movie details");

    let response = client
        .get(base_url)
        .query(&[("i", imdb_id), ("apikey", api_key)])
        .header("Accept", "application/json")
        .send()
        .await?;

    let body = read_body(response).await?;
    parse_movie_response(&body)
}

pub(crate) fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, SourceError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)?;
    if !is_true(&parsed.response) {
        return Err(SourceError::NotFound(
            parsed.error.unwrap_or_else(|| "Movie not found!".to_string()),
        ));
    }

    let results: Vec<SearchResult> = parsed.search.into_iter().map(SearchResult::from).collect();
    debug!("Parsed {} search results", results.len());
    Ok(results)
}

pub(crate) fn parse_movie_response(body: &str) -> Result<MovieDetail, SourceError> {
    let parsed: OmdbMovie = serde_json::from_str(body)?;
    if !is_true(&parsed.response) {
        return Err(SourceError::NotFound(
            parsed.error.unwrap_or_else(|| "Incorrect IMDb ID.".to_string()),
        ));
    }
    Ok(parsed.into())
}
