//! Event plumbing between fetch tasks, key handlers and the app shell
//!
//! - `AppEvent`: completed fetches, delivered over an mpsc channel
//! - `EscapeBus`: typed Escape-key subscriptions with explicit unsubscribe

use tokio_util::sync::CancellationToken;

use crate::api::{FetchError, SearchError};
use crate::models::{MovieDetail, MovieSummary};

// =============================================================================
// Fetch completions
// =============================================================================

/// A finished title search, tagged with the token it was issued under
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: String,
    pub token: CancellationToken,
    pub result: Result<Vec<MovieSummary>, SearchError>,
}

/// A finished detail lookup, tagged with the token it was issued under
#[derive(Debug)]
pub struct DetailOutcome {
    pub id: String,
    pub token: CancellationToken,
    pub result: Result<MovieDetail, FetchError>,
}

/// Messages sent back to the app shell by background fetch tasks
#[derive(Debug)]
pub enum AppEvent {
    Search(SearchOutcome),
    Detail(DetailOutcome),
}

// =============================================================================
// Escape bus
// =============================================================================

/// What an Escape subscriber asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Close the movie detail view
    CloseMovie,
}

/// Handle returned by [`EscapeBus::on_escape`]; pass it back to unsubscribe
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription leaves the handler registered"]
pub struct Subscription {
    id: u64,
}

type EscapeHandler = Box<dyn Fn() -> Option<AppAction> + Send>;

/// Registry of Escape-key handlers.
///
/// Handlers run in registration order and each may emit one action.
#[derive(Default)]
pub struct EscapeBus {
    next_id: u64,
    handlers: Vec<(u64, EscapeHandler)>,
}

impl EscapeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for the Escape key
    pub fn on_escape<F>(&mut self, handler: F) -> Subscription
    where
        F: Fn() -> Option<AppAction> + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        Subscription { id }
    }

    /// Remove a handler; returns false if it was already gone
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != subscription.id);
        self.handlers.len() != before
    }

    /// Run every handler and collect the actions they emit
    pub fn dispatch(&self) -> Vec<AppAction> {
        self.handlers
            .iter()
            .filter_map(|(_, handler)| handler())
            .collect()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for EscapeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EscapeBus")
            .field("subscriptions", &self.handlers.len())
            .finish()
    }
}
