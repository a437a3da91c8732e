//! Species statistics: classification, lifespan, language and physique

use super::stats::{average_by, format_or_na, mean, parse_positive, top_n, value_counts};
use super::{Chart, Report};
use crate::data::{Category, Species};

/// Normalizes a free-text field, mapping blanks to "Unknown"
fn label_or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds the species report
pub fn analyze(species: &[Species]) -> Report {
    if species.is_empty() {
        return Report::empty(Category::Species);
    }

    let mut report = Report::new(Category::Species, "Species Analysis");

    let classifications = value_counts(species.iter().map(|s| label_or_unknown(&s.classification)));
    let languages = value_counts(species.iter().map(|s| label_or_unknown(&s.language)));
    let lifespans: Vec<f64> = species
        .iter()
        .filter_map(|s| parse_positive(&s.average_lifespan))
        .collect();
    let heights: Vec<f64> = species
        .iter()
        .filter_map(|s| parse_positive(&s.average_height))
        .collect();

    report.metric("Total Species", species.len().to_string());
    report.metric("Total Classifications", classifications.len().to_string());
    report.metric("Total Languages", languages.len().to_string());
    report.metric(
        "Average Lifespan",
        format_or_na(mean(&lifespans), |v| format!("{:.0} years", v)),
    );
    report.metric(
        "Average Height",
        format_or_na(mean(&heights), |v| format!("{:.0} cm", v)),
    );

    report.chart(Chart::counts("Species Classification Distribution", classifications));

    report.chart(Chart::bar(
        "Top 10 Longest-Living Species",
        top_n(species, 10, |s| parse_positive(&s.average_lifespan), |s| s.name.clone()),
    ));

    let mut top_languages = languages;
    top_languages.truncate(10);
    report.chart(Chart::counts("Most Common Languages", top_languages));

    report.chart(Chart::bar(
        "Average Height by Designation",
        average_by(
            species,
            |s| label_or_unknown(&s.designation),
            |s| parse_positive(&s.average_height),
        ),
    ));

    report.chart(Chart::bar(
        "Average Height by Classification",
        average_by(
            species,
            |s| label_or_unknown(&s.classification),
            |s| parse_positive(&s.average_height),
        ),
    ));

    report
}
