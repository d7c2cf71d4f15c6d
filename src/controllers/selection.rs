//! Selected movie and its detail fetch

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{FetchError, MovieDetailService};
use crate::events::{AppEvent, DetailOutcome};
use crate::models::MovieDetail;
use crate::title::{ScopedTitle, TitleSink};

/// Lifecycle of the detail for the current selection
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    /// Nothing selected
    #[default]
    Idle,
    Loading,
    Ready(MovieDetail),
    Failed(String),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            DetailState::Ready(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DetailState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Which movie, if any, is open for detail viewing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_id: Option<String>,
}

/// Owns the selection, the detail fetch for it and the title effect.
///
/// Mutation only goes through `toggle_select` and `close`.
pub struct SelectionController {
    service: Arc<dyn MovieDetailService>,
    events: UnboundedSender<AppEvent>,
    selection: SelectionState,
    detail: DetailState,
    in_flight: Option<CancellationToken>,
    title: ScopedTitle,
}

impl SelectionController {
    pub fn new(
        service: Arc<dyn MovieDetailService>,
        events: UnboundedSender<AppEvent>,
        title_sink: Box<dyn TitleSink>,
    ) -> Self {
        Self {
            service,
            events,
            selection: SelectionState::default(),
            detail: DetailState::Idle,
            in_flight: None,
            title: ScopedTitle::new(title_sink),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected_id.as_deref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// Whether the detail view is open
    pub fn is_open(&self) -> bool {
        self.selection.selected_id.is_some()
    }

    /// Movie title the window title currently reflects
    pub fn active_title(&self) -> Option<&str> {
        self.title.active()
    }

    /// Select `id`, or deselect it if it is already selected
    pub fn toggle_select(&mut self, id: &str) {
        if self.selected_id() == Some(id) {
            self.close();
            return;
        }
        self.cancel_in_flight();
        self.title.exit();
        self.selection.selected_id = Some(id.to_string());
        self.detail = DetailState::Loading;

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        debug!(id, "fetching detail");

        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            let result = service.fetch_detail(&id, token.clone()).await;
            let _ = events.send(AppEvent::Detail(DetailOutcome { id, token, result }));
        });
    }

    /// Clear the selection unconditionally
    pub fn close(&mut self) {
        self.cancel_in_flight();
        self.title.exit();
        if let Some(id) = self.selection.selected_id.take() {
            debug!(%id, "closing detail");
        }
        self.detail = DetailState::Idle;
    }

    /// Apply a completed detail fetch; returns false if it was stale
    pub fn apply(&mut self, outcome: DetailOutcome) -> bool {
        if outcome.token.is_cancelled() || matches!(outcome.result, Err(FetchError::Cancelled)) {
            debug!(id = %outcome.id, "dropping cancelled detail");
            return false;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(detail) => {
                self.title.enter(&detail.title);
                self.detail = DetailState::Ready(detail);
            }
            Err(err) => {
                warn!(id = %outcome.id, error = %err, "detail fetch failed");
                self.detail = DetailState::Failed(err.to_string());
            }
        }
        true
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("selection", &self.selection)
            .field("detail", &self.detail)
            .field("title", &self.title)
            .finish()
    }
}
