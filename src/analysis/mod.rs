//! Descriptive statistics for each resource category
//!
//! Every category module turns its records into a [`Report`]: a handful of
//! headline metrics and a list of chart series. Reports are plain data so the
//! same report can be printed by the CLI or drawn by the dashboard.

pub mod films;
pub mod people;
pub mod planets;
pub mod species;
pub mod starships;
pub mod stats;
pub mod vehicles;

mod craft;

use crate::data::{Category, RecordSet};

/// A single headline number or label
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How a chart series should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Labelled bars, one per point
    Bar,
    /// Ordered values drawn as a sparkline
    Trend,
}

/// A titled series of labelled values
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<(String, f64)>,
}

impl Chart {
    pub fn bar(title: impl Into<String>, points: Vec<(String, f64)>) -> Self {
        Self {
            title: title.into(),
            kind: ChartKind::Bar,
            points,
        }
    }

    pub fn trend(title: impl Into<String>, points: Vec<(String, f64)>) -> Self {
        Self {
            title: title.into(),
            kind: ChartKind::Trend,
            points,
        }
    }

    /// Bar chart from label counts
    pub fn counts(title: impl Into<String>, counts: Vec<(String, usize)>) -> Self {
        Self::bar(
            title,
            counts.into_iter().map(|(l, c)| (l, c as f64)).collect(),
        )
    }

    /// Largest value in the series, or 0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }
}

/// Metrics and charts for one category
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub category: Category,
    pub title: String,
    pub metrics: Vec<Metric>,
    pub charts: Vec<Chart>,
}

impl Report {
    pub fn new(category: Category, title: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            metrics: Vec::new(),
            charts: Vec::new(),
        }
    }

    /// Report shown when a category has no records
    pub fn empty(category: Category) -> Self {
        let mut report = Self::new(category, format!("{} Analysis", category.title()));
        report.metric("Status", "No data available");
        report
    }

    pub fn metric(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.metrics.push(Metric::new(label, value));
    }

    /// Adds a chart unless it has no points
    pub fn chart(&mut self, chart: Chart) {
        if !chart.points.is_empty() {
            self.charts.push(chart);
        }
    }

    /// Looks up a metric value by label
    pub fn metric_value(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }

    /// Looks up a chart by title
    pub fn find_chart(&self, title: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.title == title)
    }
}

/// Builds the report for any category's records
pub fn analyze(records: &RecordSet) -> Report {
    match records {
        RecordSet::Films(r) => films::analyze(r),
        RecordSet::People(r) => people::analyze(r),
        RecordSet::Planets(r) => planets::analyze(r),
        RecordSet::Species(r) => species::analyze(r),
        RecordSet::Starships(r) => starships::analyze(r),
        RecordSet::Vehicles(r) => vehicles::analyze(r),
    }
}
