//! Movie data services
//!
//! The controllers depend only on the two traits below; `OmdbClient`
//! implements both against the OMDb HTTP API.

pub mod omdb;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::models::{MovieDetail, MovieSummary};

pub use omdb::OmdbClient;

/// Title search failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The API reported zero matches
    #[error("Movie not found")]
    NotFound,

    /// Non-2xx status, transport error or unreadable body
    #[error("{0}")]
    NetworkFailure(String),

    /// Superseded by a newer request
    #[error("Request cancelled")]
    Cancelled,
}

/// Single-movie lookup failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The API has no movie under this id
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NetworkFailure(String),

    #[error("Request cancelled")]
    Cancelled,
}

/// Cancellable title search.
///
/// A call whose token is cancelled, whether before the request goes out or
/// after the response arrives, resolves to [`SearchError::Cancelled`].
#[async_trait]
pub trait MovieSearchService: Send + Sync {
    async fn search(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<MovieSummary>, SearchError>;
}

/// Cancellable lookup of one movie by id
#[async_trait]
pub trait MovieDetailService: Send + Sync {
    async fn fetch_detail(
        &self,
        id: &str,
        cancel: CancellationToken,
    ) -> Result<MovieDetail, FetchError>;
}
