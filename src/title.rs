//! Scoped window-title effect
//!
//! The title shows the movie whose detail is on screen and falls back to the
//! application title once the detail view goes away.

use crossterm::{execute, terminal::SetTitle};
use std::io::stdout;
use tracing::debug;

/// Title shown when no movie detail is open
pub const DEFAULT_TITLE: &str = "PopcornTUI";

/// Something that can display a window title
pub trait TitleSink: Send {
    fn set_title(&mut self, title: &str);
}

/// Sets the hosting terminal's window title
#[derive(Debug, Default)]
pub struct TerminalTitle;

impl TitleSink for TerminalTitle {
    fn set_title(&mut self, title: &str) {
        // Terminals without title support just ignore the escape sequence
        let mut out = stdout();
        let _ = execute!(out, SetTitle(title));
    }
}

/// Discards titles (CLI mode, tests)
#[derive(Debug, Default)]
pub struct NoTitle;

impl TitleSink for NoTitle {
    fn set_title(&mut self, _title: &str) {}
}

/// Enter/exit hooks around a single active title.
///
/// `enter` fires at most once per distinct non-empty title, and the previous
/// title's cleanup always runs first. Dropping the scope runs the cleanup.
pub struct ScopedTitle {
    sink: Box<dyn TitleSink>,
    active: Option<String>,
}

impl ScopedTitle {
    pub fn new(sink: Box<dyn TitleSink>) -> Self {
        Self { sink, active: None }
    }

    /// Show `Movie | <title>`
    pub fn enter(&mut self, title: &str) {
        if title.is_empty() || self.active.as_deref() == Some(title) {
            return;
        }
        self.exit();
        debug!(title, "title effect enter");
        self.sink.set_title(&format!("Movie | {}", title));
        self.active = Some(title.to_string());
    }

    /// Restore the default title if a movie title is showing
    pub fn exit(&mut self) {
        if let Some(previous) = self.active.take() {
            debug!(title = %previous, "title effect cleanup");
            self.sink.set_title(DEFAULT_TITLE);
        }
    }

    /// Movie title currently shown, if any
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

impl Drop for ScopedTitle {
    fn drop(&mut self) {
        self.exit();
    }
}

impl std::fmt::Debug for ScopedTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedTitle")
            .field("active", &self.active)
            .finish()
    }
}
