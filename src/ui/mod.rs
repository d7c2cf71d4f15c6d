//! Terminal UI components
//!
//! Views over `App` snapshots. The only state touched here is the list
//! scroll offsets.

pub mod detail;
pub mod search;
pub mod theme;
pub mod watched;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Focus, InputMode};

/// Main render function - dispatches to panel renderers.
///
/// Takes `&mut App` only to keep the list viewports scrolled to the cursor.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    search::render_results(frame, panels[0], app);
    if app.selected_id().is_some() {
        detail::render_detail(frame, panels[1], app);
    } else {
        watched::render_watched(frame, panels[1], app);
    }

    render_status_bar(frame, chunks[2], app);

    if let Some(notice) = app.notice.as_deref() {
        render_notice(frame, area, notice);
    }
}

/// Bordered panel with a title, highlighted when it has focus
pub(crate) fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()))
}

/// Logo, search box and result count
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Logo
            Constraint::Min(1),     // Search box
            Constraint::Length(22), // Result count
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::raw("🍿 "),
        Span::styled("Popcorn", Theme::title()),
    ]))
    .alignment(Alignment::Center)
    .block(panel(String::new(), false));
    frame.render_widget(logo, chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let text = if editing {
        let (before, after) = app.input.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if app.input.value().is_empty() {
        "⌕ Press / to search movies...".to_string()
    } else {
        format!("⌕ {}", app.input.value())
    };
    let search_box = Paragraph::new(text)
        .style(if editing { Theme::text().fg(Theme::PRIMARY) } else { Theme::text() })
        .block(panel(" SEARCH ".to_string(), editing));
    frame.render_widget(search_box, chunks[1]);

    let count = Paragraph::new(Line::from(vec![
        Span::styled("Found ", Theme::dimmed()),
        Span::styled(app.search().results.len().to_string(), Theme::title()),
        Span::styled(" results", Theme::dimmed()),
    ]))
    .alignment(Alignment::Center)
    .block(panel(String::new(), false));
    frame.render_widget(count, chunks[2]);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(" NORMAL ", Theme::keybind()),
        InputMode::Editing => Span::styled(" INSERT ", Theme::highlighted()),
    };
    let focus = match app.focus {
        Focus::Results => " RESULTS ",
        Focus::Watched => " WATCHED ",
    };
    let help = if app.input_mode == InputMode::Editing {
        " ↵:done  ^U:clear  ESC:close "
    } else if app.selected_id().is_some() {
        " 1-9,0:rate  a:add watched  ESC:close  q:quit "
    } else {
        " /:search  ↵:open  TAB:switch  d:remove  q:quit "
    };

    let line = Line::from(vec![
        mode,
        Span::styled(focus, Theme::dimmed()),
        Span::raw("│"),
        Span::styled(help, Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}

/// Centered one-line message overlay
fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    let width = 60.min(area.width.saturating_sub(4));
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
    .intersection(area);
    if popup.is_empty() {
        return;
    }

    frame.render_widget(Clear, popup);
    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(body, popup);
}
