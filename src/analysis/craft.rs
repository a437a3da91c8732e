//! Shared cost, capacity and speed analysis for starships and vehicles

use super::stats::{
    average_by, format_or_na, format_thousands, mean, mode, parse_number, parse_positive, top_n,
    value_counts,
};
use super::{Chart, Report};
use crate::data::{Resource, Starship, Vehicle};

/// Number of entries in top-N charts
const TOP: usize = 10;

/// Common fields of anything that flies or drives
pub(crate) trait Craft: Resource {
    fn class(&self) -> &str;
    fn cost_in_credits(&self) -> &str;
    fn max_atmosphering_speed(&self) -> &str;
    fn crew(&self) -> &str;
    fn passengers(&self) -> &str;

    fn cost(&self) -> Option<f64> {
        parse_positive(self.cost_in_credits())
    }

    fn speed(&self) -> Option<f64> {
        parse_positive(self.max_atmosphering_speed())
    }

    /// Crew plus passengers, unknown counts as zero
    fn total_capacity(&self) -> f64 {
        parse_number(self.crew()).unwrap_or(0.0) + parse_number(self.passengers()).unwrap_or(0.0)
    }
}

impl Craft for Starship {
    fn class(&self) -> &str {
        &self.starship_class
    }
    fn cost_in_credits(&self) -> &str {
        &self.cost_in_credits
    }
    fn max_atmosphering_speed(&self) -> &str {
        &self.max_atmosphering_speed
    }
    fn crew(&self) -> &str {
        &self.crew
    }
    fn passengers(&self) -> &str {
        &self.passengers
    }
}

impl Craft for Vehicle {
    fn class(&self) -> &str {
        &self.vehicle_class
    }
    fn cost_in_credits(&self) -> &str {
        &self.cost_in_credits
    }
    fn max_atmosphering_speed(&self) -> &str {
        &self.max_atmosphering_speed
    }
    fn crew(&self) -> &str {
        &self.crew
    }
    fn passengers(&self) -> &str {
        &self.passengers
    }
}

/// Average cost over crafts with a known price
pub(crate) fn average_cost<C: Craft>(crafts: &[C]) -> Option<f64> {
    let costs: Vec<f64> = crafts.iter().filter_map(Craft::cost).collect();
    mean(&costs)
}

/// Metrics shared by starships and vehicles
pub(crate) fn add_common_metrics<C: Craft>(report: &mut Report, crafts: &[C], noun: &str) {
    report.metric(format!("Total {}", noun), crafts.len().to_string());
    report.metric(
        "Average Cost",
        format_or_na(average_cost(crafts), |v| format!("{} credits", format_thousands(v))),
    );
    report.metric(
        "Most Common Class",
        mode(crafts.iter().map(|c| c.class())).unwrap_or_else(|| "N/A".to_string()),
    );
}

/// Class, cost, capacity and speed charts
pub(crate) fn add_common_charts<C: Craft>(report: &mut Report, crafts: &[C], noun: &str) {
    let singular = noun.trim_end_matches('s');
    let label = |c: &C| c.name().to_string();

    report.chart(Chart::counts(
        format!("{} Class Distribution", singular),
        value_counts(crafts.iter().map(|c| c.class())),
    ));
    report.chart(Chart::bar(
        "Average Cost by Class",
        average_by(crafts, |c| c.class().to_string(), Craft::cost),
    ));
    report.chart(Chart::bar(
        "Average Speed by Class",
        average_by(crafts, |c| c.class().to_string(), Craft::speed),
    ));
    report.chart(Chart::bar(
        format!("Top 10 Most Expensive {}", noun),
        top_n(crafts, TOP, Craft::cost, label),
    ));
    report.chart(Chart::bar(
        "Top 10 by Total Capacity",
        top_n(crafts, TOP, |c| Some(c.total_capacity()), label),
    ));
    report.chart(Chart::bar(
        format!("Top 10 Fastest {}", noun),
        top_n(crafts, TOP, Craft::speed, label),
    ));
}
