//! UI rendering module for SWAPI Explorer
//!
//! This module contains all the rendering logic for the terminal dashboard,
//! using the ratatui library for TUI components.

pub mod category;
pub mod help_overlay;
pub mod home;
pub mod widgets;

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState};

/// Renders the UI based on the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match app.state {
        AppState::Loading => render_loading(frame, "Loading Star Wars data..."),
        AppState::Home => home::render(frame, app, chunks[0]),
        AppState::Category(category) => category::render(frame, app, category, chunks[0]),
    }

    if app.state != AppState::Loading {
        render_footer(frame, chunks[1], app);
    }

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders a centered message while data is being fetched
pub fn render_loading(frame: &mut Frame, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(frame.area());

    let loading_text = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders key hints and data freshness at the bottom of the screen
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut spans = match app.state {
        AppState::Category(_) => vec![
            key("↑/↓"),
            Span::raw(" Scroll  "),
            key("Tab"),
            Span::raw(" Next  "),
            key("Esc"),
            Span::raw(" Home  "),
        ],
        AppState::Loading | AppState::Home => vec![
            key("↑/↓"),
            Span::raw(" Navigate  "),
            key("Enter"),
            Span::raw(" Open  "),
        ],
    };
    spans.extend([
        key("1-6"),
        Span::raw(" Jump  "),
        key("r"),
        Span::raw(" Reload  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit"),
    ]);

    if app.refresh_requested {
        spans.push(Span::styled(" │ Reloading...", Style::default().fg(Color::Cyan)));
    } else if let Some(last_refresh) = app.last_refresh {
        let mins_ago = (Local::now() - last_refresh).num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Loaded just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Loaded {}m ago", mins_ago)
        } else {
            format!(" │ Loaded {}h ago", mins_ago / 60)
        };
        spans.push(Span::styled(freshness_text, Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Chart, Report};
    use crate::data::Category;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn films_report() -> Report {
        let mut report = Report::new(Category::Films, "Films Analysis");
        report.metric("Total Films", "6");
        report.metric("Date Range", "1977 - 2005");
        report.chart(Chart::bar(
            "Films by Director",
            vec![("George Lucas".to_string(), 4.0), ("Irvin Kershner".to_string(), 1.0)],
        ));
        report.chart(Chart::trend(
            "Character Count Evolution Over Time",
            vec![("1977".to_string(), 18.0), ("1980".to_string(), 16.0)],
        ));
        report
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.state = AppState::Home;
        app.reports.insert(Category::Films, Ok(films_report()));
        app.reports.insert(
            Category::People,
            Err("Failed to fetch people: HTTP 503".to_string()),
        );
        app
    }

    #[test]
    fn test_loading_screen() {
        let content = render_to_string(&App::new(), 80, 24);
        assert!(content.contains("Loading Star Wars data..."));
    }

    #[test]
    fn test_home_lists_categories_and_errors() {
        let content = render_to_string(&loaded_app(), 120, 30);
        assert!(content.contains("Categories"));
        assert!(content.contains("Starships"));
        assert!(content.contains("Total Films: 6"));
        assert!(content.contains("HTTP 503"));
        assert!(content.contains("Reload"));
    }

    #[test]
    fn test_category_page_shows_metrics_and_charts() {
        let mut app = loaded_app();
        app.open_category(Category::Films);

        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Films Analysis"));
        assert!(content.contains("Date Range"));
        assert!(content.contains("1977 - 2005"));
        assert!(content.contains("Films by Director"));
        assert!(content.contains("George Lucas"));
        assert!(content.contains("Character Count Evolution Over Time"));
    }

    #[test]
    fn test_scrolled_page_hides_metrics() {
        let mut app = loaded_app();
        app.open_category(Category::Films);
        app.scroll_down();

        let content = render_to_string(&app, 120, 40);
        assert!(!content.contains("Date Range"));
        assert!(content.contains("Films by Director"));
        assert!(content.contains("more"));
    }

    #[test]
    fn test_failed_category_shows_error_banner() {
        let mut app = loaded_app();
        app.open_category(Category::People);

        let content = render_to_string(&app, 120, 30);
        assert!(content.contains("Failed to load Characters"));
        assert!(content.contains("HTTP 503"));
        assert!(content.contains("Press r to retry"));
    }

    #[test]
    fn test_help_overlay_drawn_over_view() {
        let mut app = loaded_app();
        app.show_help = true;

        let content = render_to_string(&app, 100, 30);
        assert!(content.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = loaded_app();
        app.open_category(Category::Films);
        render_to_string(&app, 10, 4);
    }
}
