//! Plain-text rendering of reports and cache summaries for the CLI

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use colored::Colorize;

use crate::analysis::{Chart, ChartKind, Report};
use crate::cache::{EntryState, EntryStatus};
use crate::data::{Category, RecordSet};

/// Width of the longest bar in a text chart
const BAR_WIDTH: usize = 40;

/// Labels longer than this are truncated in chart rows
const LABEL_WIDTH: usize = 28;

/// Width of the category column in fetch and status tables
const CATEGORY_WIDTH: usize = 10;

/// Safely truncate a string to n characters, appending "..." if truncated
fn truncate_label(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Formats a chart value, dropping the fraction for whole numbers
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Category name padded to the table column, then colored
///
/// Padding has to happen on the plain text: colored ignores width flags
/// once escape codes are emitted.
fn category_column(category: Category) -> String {
    format!("{:<width$}", category.as_str(), width = CATEGORY_WIDTH)
        .cyan()
        .to_string()
}

/// Number of block characters for a value relative to the chart maximum
fn bar_length(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let len = (value / max * BAR_WIDTH as f64).round() as usize;
    len.clamp(1, BAR_WIDTH)
}

fn format_chart(chart: &Chart) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", chart.title.bold()));

    match chart.kind {
        ChartKind::Bar => {
            let max = chart.max_value();
            for (label, value) in &chart.points {
                output.push_str(&format!(
                    "  {:<width$} {} {}\n",
                    truncate_label(label, LABEL_WIDTH),
                    "█".repeat(bar_length(*value, max)).cyan(),
                    format_value(*value),
                    width = LABEL_WIDTH,
                ));
            }
        }
        ChartKind::Trend => {
            for (label, value) in &chart.points {
                output.push_str(&format!(
                    "  {:<width$} {}\n",
                    truncate_label(label, LABEL_WIDTH),
                    format_value(*value),
                    width = LABEL_WIDTH,
                ));
            }
        }
    }

    output
}

/// Format a full report: title, metrics, then every chart
pub fn format_report(report: &Report) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", report.title.bold()));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for metric in &report.metrics {
        output.push_str(&format!("{} {}\n", format!("{}:", metric.label).cyan(), metric.value));
    }

    for chart in &report.charts {
        output.push('\n');
        output.push_str(&format_chart(chart));
    }

    output
}

/// Format the per-category record counts after a full fetch
pub fn format_fetch_summary(records: &BTreeMap<Category, RecordSet>) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Fetched".bold()));
    for (category, set) in records {
        output.push_str(&format!("  {} {} records\n", category_column(*category), set.len()));
    }
    output
}

/// Human readable age such as "3d 4h" or "12m"
///
/// `None` when the timestamp lies after `now`.
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    let age = now - timestamp;
    if age < Duration::zero() {
        return None;
    }
    let text = if age.num_days() > 0 {
        format!("{}d {}h", age.num_days(), age.num_hours() % 24)
    } else if age.num_hours() > 0 {
        format!("{}h {}m", age.num_hours(), age.num_minutes() % 60)
    } else {
        format!("{}m", age.num_minutes())
    };
    Some(text)
}

/// Format the cache status table
pub fn format_status(
    cache_dir: &Path,
    entries: &[EntryStatus],
    ttl: Duration,
    now: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} {}\n", "Cache:".bold(), cache_dir.display()));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let detail = match &entry.state {
            EntryState::Missing => format!("{}", "missing".dimmed()),
            EntryState::Corrupt => format!("{}", "corrupt".red()),
            EntryState::Present { timestamp, records } => {
                let state = if entry.state.is_fresh(now, ttl) {
                    "fresh".green()
                } else {
                    "stale".yellow()
                };
                let fetched = match format_age(*timestamp, now) {
                    Some(age) => format!("fetched {} ago", age),
                    None => "fetched with a future timestamp".to_string(),
                };
                format!("{} {} records, {}", state, records, fetched)
            }
        };
        output.push_str(&format!("  {} {}\n", category_column(entry.category), detail));
    }

    output
}
