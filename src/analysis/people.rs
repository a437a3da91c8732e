//! Character statistics: demographics, physique, homeworlds and popularity

use super::stats::{format_or_na, mean, median, parse_positive, pearson, top_n, value_counts};
use super::{Chart, Report};
use crate::data::{Category, Person};

/// Number of entries in top-N charts
const TOP: usize = 10;

/// Label for a homeworld URL, e.g. `.../planets/1/` becomes `Planet 1`
pub fn homeworld_label(homeworld: Option<&str>) -> String {
    match homeworld {
        Some(url) if url.contains("planets") => url
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .map(|id| format!("Planet {}", id))
            .unwrap_or_else(|| "Unknown".to_string()),
        _ => "Unknown".to_string(),
    }
}

/// Weighted popularity score: `films * 2 + height / 100 + mass / 50`
///
/// Unknown height or mass contributes nothing.
pub fn popularity_index(person: &Person) -> f64 {
    let films = person.films.len() as f64;
    let height = parse_positive(&person.height).unwrap_or(0.0);
    let mass = parse_positive(&person.mass).unwrap_or(0.0);
    films * 2.0 + height / 100.0 + mass / 50.0
}

/// Pearson correlations between height, mass and film count
///
/// Only characters with both values known take part in each pair.
pub fn correlations(people: &[Person]) -> Vec<(&'static str, Option<f64>)> {
    let height_mass: Vec<(f64, f64)> = people
        .iter()
        .filter_map(|p| Some((parse_positive(&p.height)?, parse_positive(&p.mass)?)))
        .collect();
    let height_films: Vec<(f64, f64)> = people
        .iter()
        .filter_map(|p| Some((parse_positive(&p.height)?, p.films.len() as f64)))
        .collect();
    let mass_films: Vec<(f64, f64)> = people
        .iter()
        .filter_map(|p| Some((parse_positive(&p.mass)?, p.films.len() as f64)))
        .collect();

    vec![
        ("Height / Mass", pearson(&height_mass)),
        ("Height / Films", pearson(&height_films)),
        ("Mass / Films", pearson(&mass_films)),
    ]
}

/// Builds the characters report
pub fn analyze(people: &[Person]) -> Report {
    if people.is_empty() {
        return Report::empty(Category::People);
    }

    let mut report = Report::new(Category::People, "Character Analysis");

    let heights: Vec<f64> = people.iter().filter_map(|p| parse_positive(&p.height)).collect();
    let masses: Vec<f64> = people.iter().filter_map(|p| parse_positive(&p.mass)).collect();

    report.metric("Total Characters", people.len().to_string());
    report.metric(
        "Average Height",
        format_or_na(mean(&heights), |v| format!("{:.1} cm", v)),
    );
    report.metric(
        "Median Height",
        format_or_na(median(&heights), |v| format!("{:.1} cm", v)),
    );
    report.metric(
        "Average Mass",
        format_or_na(mean(&masses), |v| format!("{:.1} kg", v)),
    );
    report.metric(
        "Median Mass",
        format_or_na(median(&masses), |v| format!("{:.1} kg", v)),
    );
    if let Some(star) = people.iter().max_by_key(|p| p.films.len()) {
        report.metric(
            "Most Film Appearances",
            format!("{} ({})", star.name, star.films.len()),
        );
    }
    for (pair, r) in correlations(people) {
        report.metric(
            format!("Correlation {}", pair),
            format_or_na(r, |v| format!("{:.2}", v)),
        );
    }

    report.chart(Chart::counts(
        "Character Gender Distribution",
        value_counts(people.iter().map(|p| p.gender.as_str())),
    ));

    let mut homeworlds =
        value_counts(people.iter().map(|p| homeworld_label(p.homeworld.as_deref())));
    homeworlds.truncate(TOP);
    report.chart(Chart::counts("Top 10 Character Homeworlds", homeworlds));

    report.chart(Chart::bar(
        "Top 10 Characters by Film Appearances",
        top_n(people, TOP, |p| Some(p.films.len() as f64), |p| p.name.clone()),
    ));

    report.chart(Chart::bar(
        "Top 10 Characters by Popularity Index",
        top_n(people, TOP, |p| Some(popularity_index(p)), |p| p.name.clone()),
    ));

    let mut by_height: Vec<(String, f64)> = people
        .iter()
        .filter_map(|p| parse_positive(&p.height).map(|h| (p.name.clone(), h)))
        .collect();
    by_height.sort_by(|a, b| a.1.total_cmp(&b.1));
    report.chart(Chart::trend("Height Distribution (cm)", by_height));

    report
}
