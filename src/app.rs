//! App shell and keyboard routing
//!
//! Composes the search, selection and watched-list controllers, owns the
//! query input and list cursors, and applies fetch completions as they
//! arrive from background tasks.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use crate::api::{MovieDetailService, MovieSearchService, OmdbClient};
use crate::controllers::{
    DetailState, QueryOutcome, SearchController, SearchState, SelectionController,
    WatchedError, WatchedListController,
};
use crate::events::{AppAction, AppEvent, EscapeBus, Subscription};
use crate::models::{MovieSummary, WatchedEntry, MAX_USER_RATING};
use crate::title::TitleSink;

// =============================================================================
// Input Mode / Focus
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which list the arrow keys move in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Results,
    Watched,
}

// =============================================================================
// List cursor
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently highlighted index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
    /// First item shown in the viewport
    pub offset: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            len,
            offset: 0,
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.offset = self.offset.min(self.selected);
    }

    /// Scroll so the selected row sits inside a viewport of `visible_height` rows
    pub fn adjust_offset(&mut self, visible_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected.saturating_sub(visible_height.saturating_sub(1));
        }
    }
}

// =============================================================================
// Query input
// =============================================================================

/// Editable query text with a character-based cursor
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    value: String,
    cursor: usize,
}

impl QueryInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before and after the cursor
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index())
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor; returns whether text changed
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.value.remove(at);
        true
    }

    /// Delete character at cursor; returns whether text changed
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index();
        self.value.remove(at);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query; returns whether text changed
    pub fn clear(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        changed
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    pub focus: Focus,
    pub input: QueryInput,
    pub results_list: ListState,
    pub watched_list: ListState,
    /// Rating picked in the detail view, 0 until the user chooses one
    pub pending_rating: u8,
    /// One-shot message for the user, cleared on the next key press
    pub notice: Option<String>,

    search: SearchController,
    selection: SelectionController,
    watched: WatchedListController,

    escape: EscapeBus,
    global_escape: Option<Subscription>,
    detail_escape: Option<Subscription>,
    events: UnboundedReceiver<AppEvent>,
}

impl App {
    /// Create an app over the given services
    pub fn new(
        search_service: Arc<dyn MovieSearchService>,
        detail_service: Arc<dyn MovieDetailService>,
        title_sink: Box<dyn TitleSink>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut escape = EscapeBus::new();
        let global_escape = escape.on_escape(|| Some(AppAction::CloseMovie));

        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::Results,
            input: QueryInput::default(),
            results_list: ListState::default(),
            watched_list: ListState::default(),
            pending_rating: 0,
            notice: None,

            search: SearchController::new(search_service, tx.clone()),
            selection: SelectionController::new(detail_service, tx, title_sink),
            watched: WatchedListController::new(),

            escape,
            global_escape: Some(global_escape),
            detail_escape: None,
            events: rx,
        }
    }

    /// Create an app that uses one OMDb client for both services
    pub fn with_omdb(client: OmdbClient, title_sink: Box<dyn TitleSink>) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client, title_sink)
    }

    // -------------------------------------------------------------------------
    // Read-only snapshots for rendering
    // -------------------------------------------------------------------------

    pub fn search(&self) -> &SearchState {
        self.search.state()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected_id()
    }

    pub fn detail(&self) -> &DetailState {
        self.selection.detail()
    }

    pub fn watched(&self) -> &WatchedListController {
        &self.watched
    }

    /// Movie title the window title currently shows
    pub fn active_title(&self) -> Option<&str> {
        self.selection.active_title()
    }

    /// Live Escape subscriptions (global plus the detail view's, when open)
    pub fn escape_subscriptions(&self) -> usize {
        self.escape.len()
    }

    /// Highlighted search result
    pub fn highlighted_result(&self) -> Option<&MovieSummary> {
        self.search().results.get(self.results_list.selected)
    }

    /// Highlighted watched entry
    pub fn highlighted_watched(&self) -> Option<&WatchedEntry> {
        self.watched.entries().get(self.watched_list.selected)
    }

    /// The user's rating for the open movie, if it is already watched
    pub fn selected_user_rating(&self) -> Option<u8> {
        self.selected_id()
            .and_then(|id| self.watched.user_rating_for(id))
    }

    /// Whether "add to watched" should be offered right now
    pub fn can_add_watched(&self) -> bool {
        self.pending_rating > 0
            && self.detail().detail().is_some()
            && self.selected_user_rating().is_none()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Change the query; a new search closes the open movie
    pub fn set_query(&mut self, query: impl Into<String>) -> QueryOutcome {
        let outcome = self.search.set_query(query);
        if outcome == QueryOutcome::Fetching {
            self.close_movie();
        }
        self.results_list.set_len(self.search().results.len());
        outcome
    }

    /// Open `id`, or close it if it is already open
    pub fn toggle_movie(&mut self, id: &str) {
        self.selection.toggle_select(id);
        self.pending_rating = 0;
        self.sync_detail_escape();
    }

    pub fn close_movie(&mut self) {
        self.selection.close();
        self.pending_rating = 0;
        self.sync_detail_escape();
    }

    /// Pick a rating for the open movie
    pub fn set_rating(&mut self, rating: u8) {
        if self.selection.is_open() && self.selected_user_rating().is_none() {
            self.pending_rating = rating.min(MAX_USER_RATING);
        }
    }

    /// Add the open movie to the watched list with the pending rating.
    ///
    /// Returns `Ok(false)` when no movie detail is loaded.
    pub fn add_watched(&mut self) -> Result<bool, WatchedError> {
        let entry = match self.selection.detail().detail() {
            Some(detail) => detail.to_watched(self.pending_rating),
            None => return Ok(false),
        };
        let selection = &mut self.selection;
        self.watched.add(entry, || selection.close())?;

        self.pending_rating = 0;
        self.sync_detail_escape();
        self.watched_list.set_len(self.watched.len());
        Ok(true)
    }

    pub fn remove_watched(&mut self, id: &str) -> bool {
        let removed = self.watched.remove(id);
        self.watched_list.set_len(self.watched.len());
        removed
    }

    /// Fire the Escape bus and act on what the subscribers ask for
    pub fn escape(&mut self) {
        for action in self.escape.dispatch() {
            match action {
                AppAction::CloseMovie => self.close_movie(),
            }
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        debug!("quit requested");
        self.running = false;
        if let Some(sub) = self.global_escape.take() {
            self.escape.unsubscribe(sub);
        }
    }

    /// Keep the detail view's Escape subscription tied to its lifetime
    fn sync_detail_escape(&mut self) {
        match (self.selection.is_open(), self.detail_escape.take()) {
            (true, None) => {
                self.detail_escape = Some(self.escape.on_escape(|| Some(AppAction::CloseMovie)));
            }
            (true, Some(sub)) => self.detail_escape = Some(sub),
            (false, Some(sub)) => {
                self.escape.unsubscribe(sub);
            }
            (false, None) => {}
        }
    }

    // -------------------------------------------------------------------------
    // Fetch completions
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Search(outcome) => {
                if self.search.apply(outcome) {
                    self.results_list.set_len(self.search().results.len());
                    self.results_list.first();
                }
            }
            AppEvent::Detail(outcome) => {
                self.selection.apply(outcome);
            }
        }
    }

    /// Apply every completion already waiting; returns how many were handled
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next completion and apply it
    pub async fn process_next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        // Escape closes the detail view whatever has focus
        if key.code == KeyCode::Esc {
            self.escape();
            self.input_mode = InputMode::Normal;
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        let changed = match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return true;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear()
            }
            KeyCode::Char(c) => {
                self.input.insert(c);
                true
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => {
                self.input.cursor_left();
                false
            }
            KeyCode::Right => {
                self.input.cursor_right();
                false
            }
            KeyCode::Home => {
                self.input.cursor_home();
                false
            }
            KeyCode::End => {
                self.input.cursor_end();
                false
            }
            _ => return false,
        };
        if changed {
            let query = self.input.value().to_string();
            self.set_query(query);
        }
        true
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.input_mode = InputMode::Editing;
                self.input.cursor_end();
                true
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Results => Focus::Watched,
                    Focus::Watched => Focus::Results,
                };
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.focused_list().up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.focused_list().down();
                true
            }
            KeyCode::Home => {
                self.focused_list().first();
                true
            }
            KeyCode::End => {
                self.focused_list().last();
                true
            }
            KeyCode::Enter if self.focus == Focus::Results => {
                if let Some(id) = self.highlighted_result().map(|m| m.id.clone()) {
                    self.toggle_movie(&id);
                }
                true
            }
            KeyCode::Char('d') | KeyCode::Delete if self.focus == Focus::Watched => {
                if let Some(id) = self.highlighted_watched().map(|e| e.id.clone()) {
                    self.remove_watched(&id);
                }
                true
            }
            KeyCode::Char(c @ '0'..='9') if self.selection.is_open() => {
                // '0' is the top of the scale
                let rating = match c {
                    '0' => MAX_USER_RATING,
                    _ => c as u8 - b'0',
                };
                self.set_rating(rating);
                true
            }
            KeyCode::Char('a') if self.selection.is_open() => {
                if let Err(e) = self.add_watched() {
                    self.notice = Some(e.to_string());
                }
                true
            }
            _ => false,
        }
    }

    fn focused_list(&mut self) -> &mut ListState {
        match self.focus {
            Focus::Results => &mut self.results_list,
            Focus::Watched => &mut self.watched_list,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
