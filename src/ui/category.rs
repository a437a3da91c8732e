//! Category report page
//!
//! A report is drawn as a vertical stack of sections: the metrics block first,
//! then one section per chart. Scrolling skips whole sections so a chart is
//! never cut in half.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::home::{render_sidebar, SIDEBAR_WIDTH};
use super::widgets::TrendSparkline;
use crate::analysis::{Chart, ChartKind, Report};
use crate::app::App;
use crate::data::Category;
use crate::output::format_value;

/// Longest bar label before truncation
const LABEL_WIDTH: usize = 22;

/// Bar lengths are scaled to this many units so fractional values still show
const BAR_SCALE: f64 = 1000.0;

/// Renders the page for one category: sidebar plus report or error banner
pub fn render(frame: &mut Frame, app: &App, category: Category, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, app, chunks[0]);

    match app.report(category) {
        Some(Ok(report)) => render_report(frame, report, app.scroll_offset, chunks[1]),
        Some(Err(error)) => render_error_banner(frame, category, error, chunks[1]),
        None => render_error_banner(frame, category, "Not loaded yet", chunks[1]),
    }
}

/// Height a section needs, including its border
fn section_height(section: Section<'_>) -> u16 {
    let inner = match section {
        Section::Metrics(report) => report.metrics.len(),
        Section::Chart(chart) => match chart.kind {
            ChartKind::Bar => chart.points.len(),
            ChartKind::Trend => 2,
        },
    };
    inner as u16 + 2
}

#[derive(Clone, Copy)]
enum Section<'a> {
    Metrics(&'a Report),
    Chart(&'a Chart),
}

fn render_report(frame: &mut Frame, report: &Report, scroll_offset: usize, area: Rect) {
    let outer = Block::default()
        .title(format!(" {} ", report.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let sections: Vec<Section> = std::iter::once(Section::Metrics(report))
        .chain(report.charts.iter().map(Section::Chart))
        .collect();
    let start = scroll_offset.min(sections.len().saturating_sub(1));

    // Take whole sections until the page is full
    let mut visible = Vec::new();
    let mut used: u16 = 0;
    for section in &sections[start..] {
        let height = section_height(*section);
        if used + height > inner.height && !visible.is_empty() {
            break;
        }
        visible.push((*section, height.min(inner.height.saturating_sub(used))));
        used = used.saturating_add(height);
    }
    let hidden_below = start + visible.len() < sections.len();

    let mut constraints: Vec<Constraint> =
        visible.iter().map(|(_, h)| Constraint::Length(*h)).collect();
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (slot, (section, _)) in slots.iter().zip(&visible) {
        match section {
            Section::Metrics(report) => render_metrics(frame, report, *slot),
            Section::Chart(chart) => match chart.kind {
                ChartKind::Bar => render_bar_chart(frame, chart, *slot),
                ChartKind::Trend => render_trend(frame, chart, *slot),
            },
        }
    }

    if start > 0 {
        render_scroll_indicator(frame, area, "\u{25B2} more", area.y); // ▲
    }
    if hidden_below {
        let bottom = area.y + area.height.saturating_sub(1);
        render_scroll_indicator(frame, area, "\u{25BC} more", bottom); // ▼
    }
}

fn render_metrics(frame: &mut Frame, report: &Report, area: Rect) {
    let lines: Vec<Line> = report
        .metrics
        .iter()
        .map(|metric| {
            Line::from(vec![
                Span::styled(
                    format!("{:<28}", metric.label),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(metric.value.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let block = Block::default().title(" Summary ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Truncates a label to fit the bar chart's label column
fn short_label(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let truncated: String = label.chars().take(LABEL_WIDTH - 1).collect();
        format!("{}\u{2026}", truncated)
    } else {
        label.to_string()
    }
}

/// Converts a chart value into the integer bar length ratatui expects
fn scaled_length(value: f64, max: f64) -> u64 {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_SCALE).round() as u64
}

fn render_bar_chart(frame: &mut Frame, chart: &Chart, area: Rect) {
    let max = chart.max_value();
    let bars: Vec<Bar> = chart
        .points
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .label(Line::from(short_label(label)))
                .value(scaled_length(*value, max))
                .text_value(format_value(*value))
        })
        .collect();

    let bar_chart = BarChart::default()
        .block(Block::default().title(format!(" {} ", chart.title)).borders(Borders::ALL))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(BAR_SCALE as u64)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(bar_chart, area);
}

fn render_trend(frame: &mut Frame, chart: &Chart, area: Rect) {
    let block = Block::default().title(format!(" {} ", chart.title)).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let values: Vec<f64> = chart.points.iter().map(|(_, v)| *v).collect();
    let peak = values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i);

    let mut sparkline = TrendSparkline::new(&values, chart.max_value());
    if let Some(index) = peak {
        sparkline = sparkline.highlight(index);
    }
    frame.render_widget(sparkline, Rect { height: 1, ..inner });

    if inner.height > 1 {
        let caption = match (chart.points.first(), peak.and_then(|i| chart.points.get(i))) {
            (Some((first, _)), Some((peak_label, peak_value))) => format!(
                "{} points from {}, peak {} at {}",
                chart.points.len(),
                first,
                format_value(*peak_value),
                peak_label
            ),
            _ => String::new(),
        };
        let caption_area = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        frame.render_widget(
            Paragraph::new(caption).style(Style::default().fg(Color::DarkGray)),
            caption_area,
        );
    }
}

/// Renders a red banner explaining why a category has no report
fn render_error_banner(frame: &mut Frame, category: Category, error: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Failed to load {}", category.title()),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(format!(" {} ", category.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_scroll_indicator(frame: &mut Frame, area: Rect, text: &'static str, y: u16) {
    if area.width < 10 {
        return;
    }
    let indicator_area = Rect {
        x: area.x + area.width.saturating_sub(9),
        y,
        width: 7,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::Yellow))),
        indicator_area,
    );
}
