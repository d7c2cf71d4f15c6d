//! Movie detail panel
//!
//! Loading, failure and ready states, plus the rating prompt.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{panel, Theme};
use crate::app::App;
use crate::controllers::DetailState;
use crate::models::{MovieDetail, MAX_USER_RATING};

pub fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .detail()
        .detail()
        .map(|d| format!(" {} ", d.title))
        .unwrap_or_else(|| " DETAIL ".to_string());
    let block = panel(title, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.detail() {
        DetailState::Idle => {}
        DetailState::Loading => {
            let loading = Paragraph::new("⟳ Loading...")
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
        }
        DetailState::Failed(msg) => {
            let error = Paragraph::new(vec![
                Line::from(Span::styled(format!("⛔ {}", msg), Theme::error())),
                Line::from(""),
                Line::from(vec![
                    Span::styled(" ESC ", Theme::keybind()),
                    Span::styled(" Go back", Theme::dimmed()),
                ]),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(error, inner);
        }
        DetailState::Ready(detail) => {
            let body = Paragraph::new(detail_lines(detail, app))
                .wrap(Wrap { trim: true })
                .style(Theme::text());
            frame.render_widget(body, inner);
        }
    }
}

fn detail_lines<'a>(detail: &'a MovieDetail, app: &App) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(detail.released.as_str(), Theme::dimmed()),
            Span::styled(format!(" • {} min", detail.runtime_minutes), Theme::dimmed()),
        ]),
        Line::from(Span::styled(detail.genre.as_str(), Theme::accent())),
        Line::from(vec![
            Span::styled("⭐ ", Theme::rating()),
            Span::styled(format!("{:.1}", detail.imdb_rating), Theme::rating()),
            Span::styled(" IMDb rating", Theme::dimmed()),
        ]),
        Line::from(""),
    ];

    lines.push(rating_line(app));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(detail.plot.as_str(), Theme::text())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Starring ", Theme::dimmed()),
        Span::styled(detail.actors.as_str(), Theme::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Directed by ", Theme::dimmed()),
        Span::styled(detail.director.as_str(), Theme::text()),
    ]));
    lines
}

/// Rating prompt, or the stored rating once the movie is watched
fn rating_line(app: &App) -> Line<'static> {
    if let Some(rating) = app.selected_user_rating() {
        return Line::from(Span::styled(
            format!("You rated this movie {} ⭐", rating),
            Theme::rating(),
        ));
    }

    let pending = app.pending_rating;
    let mut spans: Vec<Span> = (1..=MAX_USER_RATING)
        .map(|star| {
            if star <= pending {
                Span::styled("★", Theme::title())
            } else {
                Span::styled("☆", Theme::dimmed())
            }
        })
        .collect();

    if pending > 0 {
        spans.push(Span::styled(format!(" {}", pending), Theme::title()));
    }
    if app.can_add_watched() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(" a ", Theme::keybind()));
        spans.push(Span::styled(" + Add to list", Theme::dimmed()));
    }
    Line::from(spans)
}
