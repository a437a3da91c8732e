//! Starship statistics: classes, cost, capacity and performance

use super::craft::{add_common_charts, add_common_metrics};
use super::stats::{format_or_na, format_thousands, mean, parse_number, parse_positive, sum, top_n};
use super::{Chart, Report};
use crate::data::{Category, Starship};

/// Builds the starships report
pub fn analyze(starships: &[Starship]) -> Report {
    if starships.is_empty() {
        return Report::empty(Category::Starships);
    }

    let mut report = Report::new(Category::Starships, "Starship Analysis");
    add_common_metrics(&mut report, starships, "Starships");

    let mglt: Vec<f64> = starships.iter().filter_map(|s| parse_positive(&s.mglt)).collect();
    report.metric(
        "Average Speed",
        format_or_na(mean(&mglt), |v| format!("{:.1} MGLT", v)),
    );

    let passengers: Vec<f64> = starships
        .iter()
        .filter_map(|s| parse_number(&s.passengers))
        .collect();
    report.metric("Total Passenger Capacity", format_thousands(sum(&passengers)));

    add_common_charts(&mut report, starships, "Starships");

    report.chart(Chart::bar(
        "Top 10 by Hyperdrive Rating",
        top_n(starships, 10, |s| parse_positive(&s.hyperdrive_rating), |s| s.name.clone()),
    ));

    report
}
