//! Vehicle statistics: classes, cost, capacity and performance

use super::craft::{add_common_charts, add_common_metrics, Craft};
use super::stats::{format_or_na, mean, parse_positive, top_n};
use super::{Chart, Report};
use crate::data::{Category, Vehicle};

/// Builds the vehicles report
pub fn analyze(vehicles: &[Vehicle]) -> Report {
    if vehicles.is_empty() {
        return Report::empty(Category::Vehicles);
    }

    let mut report = Report::new(Category::Vehicles, "Vehicle Analysis");
    add_common_metrics(&mut report, vehicles, "Vehicles");

    let speeds: Vec<f64> = vehicles.iter().filter_map(Craft::speed).collect();
    report.metric(
        "Average Speed",
        format_or_na(mean(&speeds), |v| format!("{:.0} km/h", v)),
    );

    add_common_charts(&mut report, vehicles, "Vehicles");

    report.chart(Chart::bar(
        "Top 10 by Cargo Capacity",
        top_n(vehicles, 10, |v| parse_positive(&v.cargo_capacity), |v| v.name.clone()),
    ));

    report
}
