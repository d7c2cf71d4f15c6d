//! Watched list panel: summary row and entries

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{panel, Theme};
use crate::app::{App, Focus};
use crate::controllers::WatchedListController;

pub fn render_watched(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel(" WATCHED ".to_string(), app.focus == Focus::Watched);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(summary_lines(app.watched())), chunks[0]);

    let visible_height = chunks[1].height as usize;
    app.watched_list.adjust_offset(visible_height);
    let app = &*app;
    let watched = app.watched();
    if watched.is_empty() {
        let empty = Paragraph::new("Open a movie, rate it and press a")
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = watched
        .entries()
        .iter()
        .enumerate()
        .skip(app.watched_list.offset)
        .take(visible_height)
        .map(|(i, entry)| {
            let is_selected = app.focus == Focus::Watched && i == app.watched_list.selected;
            let line = Line::from(vec![
                Span::styled(
                    if is_selected { "▸ " } else { "  " },
                    Theme::accent(),
                ),
                Span::styled(
                    entry.title.as_str(),
                    if is_selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
                Span::styled(format!("  ⭐ {:.1}", entry.imdb_rating), Theme::rating()),
                Span::styled(format!("  🌟 {}", entry.user_rating), Theme::title()),
                Span::styled(format!("  ⏳ {} min", entry.runtime_minutes), Theme::dimmed()),
            ]);
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), chunks[1]);
}

fn summary_lines(watched: &WatchedListController) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("MOVIES YOU WATCHED", Theme::title())),
        Line::from(vec![
            Span::styled(format!("#️⃣ {} movies", watched.len()), Theme::text()),
            Span::styled(
                format!("  ⭐ {:.2}", watched.average_imdb_rating()),
                Theme::rating(),
            ),
            Span::styled(
                format!("  🌟 {:.2}", watched.average_user_rating()),
                Theme::title(),
            ),
            Span::styled(
                format!("  ⏳ {:.0} min", watched.average_runtime()),
                Theme::dimmed(),
            ),
        ]),
    ]
}
