//! OMDb (Open Movie Database) API client
//!
//! Title search (`s=`) and lookup by IMDb id (`i=`).
//! API docs: https://www.omdbapi.com/

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{FetchError, MovieDetailService, MovieSearchService, SearchError};
use crate::models::{parse_rating, parse_runtime, MovieDetail, MovieSummary};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failures, folded into `NetworkFailure` by the services
#[derive(Error, Debug)]
enum OmdbError {
    #[error("Something went wrong (HTTP {0})")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// OMDb API client
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a new OMDb client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_http_client(DEFAULT_TIMEOUT),
        }
    }

    /// Replace the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Make a keyed GET request and decode the JSON body
    async fn get<T: for<'de> Deserialize<'de>>(&self, params: &str) -> Result<T, OmdbError> {
        let url = format!(
            "{}/?apikey={}&{}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            params
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| OmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            status => Err(OmdbError::Status(status.as_u16())),
        }
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

#[async_trait]
impl MovieSearchService for OmdbClient {
    async fn search(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<MovieSummary>, SearchError> {
        let params = format!("s={}", urlencoding::encode(query));
        debug!(query, "omdb search");

        // Dropping the request future on cancel tears down the connection
        let response: SearchResponse = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            result = self.get(&params) => result.map_err(|e| {
                warn!(query, error = %e, "omdb search failed");
                SearchError::NetworkFailure(e.to_string())
            })?,
        };

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        response.into_results()
    }
}

#[async_trait]
impl MovieDetailService for OmdbClient {
    async fn fetch_detail(
        &self,
        id: &str,
        cancel: CancellationToken,
    ) -> Result<MovieDetail, FetchError> {
        let params = format!("i={}", urlencoding::encode(id));
        debug!(id, "omdb lookup");

        let response: DetailResponse = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            result = self.get(&params) => result.map_err(|e| {
                warn!(id, error = %e, "omdb lookup failed");
                FetchError::NetworkFailure(e.to_string())
            })?,
        };

        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        response.into_detail()
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    #[serde(default)]
    search: Option<Vec<SearchItemRaw>>,
    response: String,
}

impl SearchResponse {
    fn into_results(self) -> Result<Vec<MovieSummary>, SearchError> {
        if self.response != "True" {
            return Err(SearchError::NotFound);
        }
        match self.search {
            Some(items) if !items.is_empty() => {
                Ok(items.into_iter().map(SearchItemRaw::into_summary).collect())
            }
            _ => Err(SearchError::NotFound),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchItemRaw {
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(default)]
    poster: String,
}

impl SearchItemRaw {
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: normalize_poster(self.poster),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailResponse {
    response: String,
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    title: Option<String>,
    year: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

impl DetailResponse {
    fn into_detail(self) -> Result<MovieDetail, FetchError> {
        if self.response != "True" {
            return Err(FetchError::NotFound(
                self.error.unwrap_or_else(|| "Movie not found".to_string()),
            ));
        }
        let id = self
            .imdb_id
            .ok_or_else(|| FetchError::NetworkFailure("Invalid response: missing imdbID".into()))?;

        Ok(MovieDetail {
            id,
            title: self.title.unwrap_or_default(),
            poster_url: normalize_poster(self.poster.unwrap_or_default()),
            runtime_minutes: self.runtime.as_deref().map(parse_runtime).unwrap_or(0),
            year: self.year.unwrap_or_default(),
            imdb_rating: self.imdb_rating.as_deref().map(parse_rating).unwrap_or(0.0),
            plot: self.plot.unwrap_or_default(),
            released: self.released.unwrap_or_default(),
            actors: self.actors.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
        })
    }
}

/// OMDb uses "N/A" for a missing poster
fn normalize_poster(poster: String) -> String {
    if poster == "N/A" {
        String::new()
    } else {
        poster
    }
}
