//! Search results panel

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{panel, Theme};
use crate::app::{App, Focus};
use crate::controllers::MIN_QUERY_LEN;

pub fn render_results(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel(" RESULTS ".to_string(), app.focus == Focus::Results);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner.height as usize;
    app.results_list.adjust_offset(visible_height);
    let app = &*app;
    let state = app.search();

    if state.loading {
        let loading = Paragraph::new("⟳ Loading...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if let Some(ref error) = state.error {
        let error = Paragraph::new(format!("⛔ {}", error))
            .style(Theme::error())
            .alignment(Alignment::Center);
        frame.render_widget(error, inner);
        return;
    }

    if state.results.is_empty() {
        let hint = if state.query.chars().count() < MIN_QUERY_LEN {
            format!("Type at least {} characters to search", MIN_QUERY_LEN)
        } else {
            "No results".to_string()
        };
        let empty = Paragraph::new(hint)
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let open = app.selected_id();
    let items: Vec<ListItem> = state
        .results
        .iter()
        .enumerate()
        .skip(app.results_list.offset)
        .take(visible_height)
        .map(|(i, movie)| {
            let is_selected = app.focus == Focus::Results && i == app.results_list.selected;
            let is_open = open == Some(movie.id.as_str());
            let marker = if is_open {
                "● "
            } else if is_selected {
                "▸ "
            } else {
                "  "
            };

            let mut spans = vec![
                Span::styled(marker, Theme::accent()),
                Span::styled(
                    movie.title.as_str(),
                    if is_selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
                Span::styled(format!(" 🗓 {}", movie.year), Theme::dimmed()),
            ];
            if app.watched().contains(&movie.id) {
                spans.push(Span::styled(" ✓", Theme::rating()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), inner);
}
