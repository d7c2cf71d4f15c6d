//! PopcornTUI - search movies, rate them, track what you watched
//!
//! Type-ahead OMDb search with cancellation of superseded requests, a detail
//! view with a 1-10 rating prompt, and a watched list with running averages.
//!
//! # Modules
//!
//! - `models` - Movie summaries, details and watched entries
//! - `api` - Service traits and the OMDb client
//! - `controllers` - Search, selection and watched-list state machines
//! - `events` - Fetch completions and the Escape bus
//! - `title` - Window title while a movie is open
//! - `app` - App shell and keyboard routing
//! - `ui` - TUI components
//! - `cli`, `commands` - Scriptable subcommands
//! - `config`, `logging` - Settings file and tracing setup

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controllers;
pub mod events;
pub mod logging;
pub mod models;
pub mod title;
pub mod ui;

// Re-export commonly used types
pub use models::{MovieDetail, MovieSummary, WatchedEntry, MAX_USER_RATING};

pub use api::{FetchError, MovieDetailService, MovieSearchService, OmdbClient, SearchError};
pub use app::{App, Focus, InputMode};
pub use config::Config;
pub use controllers::{
    DetailState, QueryOutcome, SearchController, SearchState, SelectionController,
    WatchedError, WatchedListController,
};
pub use title::{NoTitle, ScopedTitle, TerminalTitle, TitleSink};
