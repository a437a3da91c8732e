//! Planet statistics: climates, terrains, population and orbital mechanics

use super::stats::{
    average_by, format_or_na, format_thousands, mean, parse_number, parse_positive, split_counts,
    top_n,
};
use super::{Chart, Report};
use crate::data::{Category, Planet};

/// Rotation periods at or above this many hours are treated as outliers
const MAX_ROTATION_HOURS: f64 = 1000.0;

/// Orbital periods at or above this many days are treated as outliers
const MAX_ORBIT_DAYS: f64 = 2000.0;

/// Builds the planets report
pub fn analyze(planets: &[Planet]) -> Report {
    if planets.is_empty() {
        return Report::empty(Category::Planets);
    }

    let mut report = Report::new(Category::Planets, "Planets Analysis");

    let climates = split_counts(planets.iter().map(|p| p.climate.as_str()));
    let terrains = split_counts(planets.iter().map(|p| p.terrain.as_str()));

    let diameters: Vec<f64> = planets.iter().filter_map(|p| parse_positive(&p.diameter)).collect();
    let rotations: Vec<f64> = planets
        .iter()
        .filter_map(|p| parse_positive(&p.rotation_period))
        .filter(|r| *r < MAX_ROTATION_HOURS)
        .collect();
    let orbits: Vec<f64> = planets
        .iter()
        .filter_map(|p| parse_positive(&p.orbital_period))
        .filter(|o| *o < MAX_ORBIT_DAYS)
        .collect();

    report.metric("Total Planets", planets.len().to_string());
    report.metric("Total Unique Climates", climates.len().to_string());
    report.metric(
        "Average Diameter",
        format_or_na(mean(&diameters), |v| format!("{} km", format_thousands(v))),
    );
    report.metric(
        "Average Rotation",
        format_or_na(mean(&rotations), |v| format!("{} hours", format_thousands(v))),
    );
    report.metric(
        "Average Orbit",
        format_or_na(mean(&orbits), |v| format!("{} days", format_thousands(v))),
    );

    let mut top_climates = climates;
    top_climates.truncate(8);
    report.chart(Chart::counts("Planet Climate Distribution", top_climates));

    let mut top_terrains = terrains;
    top_terrains.truncate(10);
    report.chart(Chart::counts("Most Common Terrain Types", top_terrains));

    report.chart(Chart::bar(
        "Top 10 Most Populated Planets",
        top_n(planets, 10, |p| parse_positive(&p.population), |p| p.name.clone()),
    ));

    let mut water = average_by(planets, |p| p.climate.clone(), |p| parse_number(&p.surface_water));
    water.truncate(8);
    report.chart(Chart::bar("Average Surface Water by Climate (%)", water));

    let mut sizes: Vec<(String, f64)> = planets
        .iter()
        .filter_map(|p| parse_positive(&p.diameter).map(|d| (p.name.clone(), d)))
        .collect();
    sizes.sort_by(|a, b| a.1.total_cmp(&b.1));
    report.chart(Chart::trend("Planet Diameters (km)", sizes));

    report
}
