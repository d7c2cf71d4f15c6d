//! Query-driven search with cancellation of superseded requests

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{MovieSearchService, SearchError};
use crate::events::{AppEvent, SearchOutcome};
use crate::models::MovieSummary;

/// Queries shorter than this (in characters) never reach the API
pub const MIN_QUERY_LEN: usize = 3;

/// Message shown when the API has no matches
pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Search view state; everything but `query` is derived from fetches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<MovieSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

/// What `set_query` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Same text as before; nothing happened
    Unchanged,
    /// Below the minimum length; results cleared, no fetch
    TooShort,
    /// A new search was issued
    Fetching,
}

/// Owns [`SearchState`] and the single in-flight search
pub struct SearchController {
    service: Arc<dyn MovieSearchService>,
    events: UnboundedSender<AppEvent>,
    state: SearchState,
    in_flight: Option<CancellationToken>,
}

impl SearchController {
    pub fn new(service: Arc<dyn MovieSearchService>, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            service,
            events,
            state: SearchState::default(),
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Whether a search is currently outstanding
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replace the query and run the fetch protocol for it
    pub fn set_query(&mut self, query: impl Into<String>) -> QueryOutcome {
        let query = query.into();
        if query == self.state.query {
            return QueryOutcome::Unchanged;
        }
        self.cancel_in_flight();
        self.state.query = query;
        self.state.error = None;

        if self.state.query.chars().count() < MIN_QUERY_LEN {
            self.state.results.clear();
            self.state.loading = false;
            return QueryOutcome::TooShort;
        }

        self.state.loading = true;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        debug!(query = %self.state.query, "issuing search");

        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let query = self.state.query.clone();
        tokio::spawn(async move {
            let result = service.search(&query, token.clone()).await;
            // Receiver gone means the app is shutting down
            let _ = events.send(AppEvent::Search(SearchOutcome {
                query,
                token,
                result,
            }));
        });
        QueryOutcome::Fetching
    }

    /// Apply a completed search; returns false if it was stale
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.token.is_cancelled() || matches!(outcome.result, Err(SearchError::Cancelled)) {
            debug!(query = %outcome.query, "dropping cancelled search");
            return false;
        }
        self.in_flight = None;
        self.state.loading = false;

        match outcome.result {
            Ok(results) => {
                debug!(query = %outcome.query, count = results.len(), "search results");
                self.state.results = results;
                self.state.error = None;
            }
            Err(SearchError::NotFound) => {
                self.state.results.clear();
                self.state.error = Some(NOT_FOUND_MESSAGE.to_string());
            }
            Err(err) => {
                self.state.results.clear();
                self.state.error = Some(err.to_string());
            }
        }
        true
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            debug!(query = %self.state.query, "cancelling search");
            token.cancel();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &self.state)
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}
