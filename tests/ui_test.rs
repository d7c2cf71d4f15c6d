//! UI rendering tests for PopcornTUI
//!
//! Renders the full frame into a `TestBackend` and checks what ends up on
//! screen for each app state.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use popcorntui::api::{FetchError, MovieDetailService, MovieSearchService, SearchError};
use popcorntui::models::{MovieDetail, MovieSummary};
use popcorntui::title::NoTitle;
use popcorntui::ui;
use popcorntui::App;

/// Answers instantly: "heat" has two hits, everything else is not found
struct Instant;

#[async_trait]
impl MovieSearchService for Instant {
    async fn search(
        &self,
        query: &str,
        _cancel: CancellationToken,
    ) -> Result<Vec<MovieSummary>, SearchError> {
        if query != "heat" {
            return Err(SearchError::NotFound);
        }
        Ok(vec![
            MovieSummary {
                id: "tt0113277".into(),
                title: "Heat".into(),
                year: "1995".into(),
                poster_url: String::new(),
            },
            MovieSummary {
                id: "tt0084058".into(),
                title: "Heat and Dust".into(),
                year: "1983".into(),
                poster_url: String::new(),
            },
        ])
    }
}

#[async_trait]
impl MovieDetailService for Instant {
    async fn fetch_detail(
        &self,
        id: &str,
        _cancel: CancellationToken,
    ) -> Result<MovieDetail, FetchError> {
        Ok(MovieDetail {
            id: id.into(),
            title: format!("Heat {}", id),
            poster_url: String::new(),
            runtime_minutes: 170,
            year: "1995".into(),
            imdb_rating: 8.3,
            plot: "A group of high-end professional thieves.".into(),
            released: "15 Dec 1995".into(),
            actors: "Al Pacino, Robert De Niro".into(),
            director: "Michael Mann".into(),
            genre: "Action, Crime, Drama".into(),
        })
    }
}

fn app() -> App {
    let service = Arc::new(Instant);
    App::new(service.clone(), service, Box::new(NoTitle))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_renders_at_min_and_large_sizes() {
    let mut app = app();
    for (w, h) in [(80, 24), (200, 50)] {
        let text = screen_text(&draw(&mut app, w, h));
        assert!(text.contains("SEARCH"), "{}x{} missing search box", w, h);
        assert!(text.contains("RESULTS"));
        assert!(text.contains("WATCHED"));
        assert!(text.contains("NORMAL"));
    }
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = app();
    draw(&mut app, 10, 4);
}

#[test]
fn test_initial_hints() {
    let text = screen_text(&draw(&mut app(), 100, 30));
    assert!(text.contains("Press / to search"));
    assert!(text.contains("Found 0 results"));
    assert!(text.contains("0 movies"));
}

// =============================================================================
// Search states
// =============================================================================

#[tokio::test]
async fn test_loading_then_results() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('/')));
    for c in "heat".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    assert_eq!(app.input.value(), "heat");

    let text = screen_text(&draw(&mut app, 100, 30));
    assert!(text.contains("Loading..."));
    assert!(text.contains("INSERT"));

    // "hea" was superseded by "heat"; its completion is dropped
    while app.search().loading {
        assert!(app.process_next_event().await);
    }
    let text = screen_text(&draw(&mut app, 100, 30));
    assert!(text.contains("Heat and Dust"));
    assert!(text.contains("Found 2 results"));
}

#[tokio::test]
async fn test_not_found_message() {
    let mut app = app();
    app.set_query("nothing here");
    assert!(app.process_next_event().await);

    let text = screen_text(&draw(&mut app, 100, 30));
    assert!(text.contains("Movie not found"));
}

// =============================================================================
// Detail + watched
// =============================================================================

#[tokio::test]
async fn test_detail_panel_and_rating_prompt() {
    let mut app = app();
    app.toggle_movie("tt0113277");
    assert!(app.process_next_event().await);

    let text = screen_text(&draw(&mut app, 120, 30));
    assert!(text.contains("Michael Mann"));
    assert!(text.contains("170 min"));
    assert!(!text.contains("Add to list"));

    app.handle_key(key(KeyCode::Char('9')));
    let text = screen_text(&draw(&mut app, 120, 30));
    assert!(text.contains("Add to list"));

    app.handle_key(key(KeyCode::Char('a')));
    assert!(app.selected_id().is_none());

    let text = screen_text(&draw(&mut app, 120, 30));
    assert!(text.contains("1 movies"));
    assert!(text.contains("9.00"));
}

#[tokio::test]
async fn test_watched_rating_shown_on_reopen() {
    let mut app = app();
    app.toggle_movie("tt0113277");
    assert!(app.process_next_event().await);
    app.set_rating(7);
    assert_eq!(app.add_watched(), Ok(true));

    app.toggle_movie("tt0113277");
    assert!(app.process_next_event().await);

    let text = screen_text(&draw(&mut app, 120, 30));
    assert!(text.contains("You rated this movie 7"));
}

// =============================================================================
// Notice popup
// =============================================================================

#[tokio::test]
async fn test_add_without_rating_shows_notice() {
    let mut app = app();
    app.toggle_movie("tt0113277");
    assert!(app.process_next_event().await);

    app.handle_key(key(KeyCode::Char('a')));
    assert_eq!(
        app.notice.as_deref(),
        Some("Rating must be between 1 and 10, got 0")
    );
    assert!(app.watched().is_empty());

    let text = screen_text(&draw(&mut app, 100, 30));
    assert!(text.contains("Rating must be between 1 and 10"));

    // Next key press dismisses it
    app.handle_key(key(KeyCode::Char('5')));
    assert!(app.notice.is_none());
}

#[test]
fn test_notice_fits_short_terminal() {
    let mut app = app();
    app.notice = Some("Rating must be between 1 and 10, got 0".into());
    for (w, h) in [(80, 4), (80, 1), (3, 3)] {
        draw(&mut app, w, h);
    }
}

// =============================================================================
// Scrolling
// =============================================================================

#[tokio::test]
async fn test_watched_list_scrolls_to_cursor() {
    let mut app = app();
    for i in 0..25 {
        app.toggle_movie(&format!("tt{:07}", i));
        assert!(app.process_next_event().await);
        app.set_rating(6);
        assert_eq!(app.add_watched(), Ok(true));
    }

    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::End));
    assert_eq!(app.watched_list.selected, 24);

    let text = screen_text(&draw(&mut app, 80, 24));
    assert!(text.contains("Heat tt0000024"));
    assert!(!text.contains("Heat tt0000000"));
    assert!(app.watched_list.offset > 0);

    // The row that `d` removes is the one on screen
    app.handle_key(key(KeyCode::Char('d')));
    assert!(!app.watched().contains("tt0000024"));
    assert_eq!(app.watched().len(), 24);

    app.handle_key(key(KeyCode::Home));
    let text = screen_text(&draw(&mut app, 80, 24));
    assert!(text.contains("Heat tt0000000"));
    assert_eq!(app.watched_list.offset, 0);
}
