//! Home screen and the category sidebar shared with the report pages

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::data::Category;

/// Width of the sidebar including borders
pub const SIDEBAR_WIDTH: u16 = 26;

/// Marker and color for a category's load result
fn status_marker(app: &App, category: Category) -> (&'static str, Color) {
    match app.report(category) {
        Some(Ok(_)) => ("\u{2713}", Color::Green), // ✓
        Some(Err(_)) => ("\u{2717}", Color::Red),  // ✗
        None => ("\u{2026}", Color::DarkGray),     // …
    }
}

/// Renders the category list with the selection cursor
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let open = match app.state {
        AppState::Category(category) => Some(category),
        AppState::Loading | AppState::Home => None,
    };

    let lines: Vec<Line> = Category::ALL
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let is_selected = index == app.selected_index;
            let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸
            let (marker, marker_color) = status_marker(app, *category);

            let name_style = if Some(*category) == open {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{} ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<12}", category.title()), name_style),
                Span::styled(marker, Style::default().fg(marker_color)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the home page: sidebar plus a one-line summary per category
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, app, chunks[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            "Statistics from the Star Wars API, cached locally.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for category in Category::ALL {
        let summary = match app.report(category) {
            Some(Ok(report)) => {
                let headline = report
                    .metrics
                    .first()
                    .map(|m| format!("{}: {}", m.label, m.value))
                    .unwrap_or_default();
                Span::styled(
                    format!("{}, {} charts", headline, report.charts.len()),
                    Style::default().fg(Color::White),
                )
            }
            Some(Err(error)) => Span::styled(error.clone(), Style::default().fg(Color::Red)),
            None => Span::styled("not loaded", Style::default().fg(Color::DarkGray)),
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", category.title()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            summary,
        ]));
    }

    let errors = app.error_count();
    if errors > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} categories failed to load. Press r to retry.", errors),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .title(" SWAPI Explorer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, chunks[1]);
}
