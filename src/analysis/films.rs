//! Film statistics: release timeline, cast sizes, producers, per-film
//! resource counts and opening crawl words

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use super::stats::{mean, split_counts, value_counts};
use super::{Chart, Report};
use crate::data::{Category, Film};

/// Words ignored when counting opening crawl vocabulary
const STOP_WORDS: [&str; 14] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Characters stripped from both ends of crawl words
const WORD_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', '(', ')', '[', ']', '{', '}', '"', ':', ';',
];

/// Number of crawl words shown in the frequency chart
const TOP_WORDS: usize = 15;

/// Number of characters shown in the appearances chart
const TOP_CHARACTERS: usize = 10;

/// Number of species shown in the species chart
const TOP_SPECIES: usize = 5;

/// Parses a SWAPI release date (`YYYY-MM-DD`)
pub fn release_date(film: &Film) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&film.release_date, "%Y-%m-%d").ok()
}

/// Counts words across every opening crawl
///
/// Words are lowercased and trimmed of punctuation; stop words are dropped.
pub fn word_frequencies(films: &[Film]) -> Vec<(String, usize)> {
    let words: Vec<String> = films
        .iter()
        .flat_map(|film| film.opening_crawl.split_whitespace())
        .map(|word| word.to_lowercase().trim_matches(WORD_PUNCTUATION).to_string())
        .filter(|word| !word.is_empty() && !STOP_WORDS.contains(&word.as_str()))
        .collect();
    value_counts(words)
}

/// Trailing id of a SWAPI resource URL (`.../people/13/` is `13`)
pub fn resource_id(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

/// How many films each linked resource appears in
///
/// Sorted like [`value_counts`]; labels are `"{prefix} #{id}"`.
fn appearances<'a>(
    films: &'a [Film],
    links: impl Fn(&'a Film) -> &'a [String],
    prefix: &str,
) -> Vec<(String, usize)> {
    value_counts(
        films
            .iter()
            .flat_map(|f| links(f).iter())
            .map(|url| format!("{} #{}", prefix, resource_id(url))),
    )
}

/// Films ordered by episode number
fn by_episode(films: &[Film]) -> Vec<&Film> {
    let mut sorted: Vec<&Film> = films.iter().collect();
    sorted.sort_by_key(|f| f.episode_id);
    sorted
}

/// Builds the films report
pub fn analyze(films: &[Film]) -> Report {
    if films.is_empty() {
        return Report::empty(Category::Films);
    }

    let mut report = Report::new(Category::Films, "Films Analysis");

    report.metric("Total Films", films.len().to_string());

    let years: Vec<i32> = films.iter().filter_map(release_date).map(|d| d.year()).collect();
    let date_range = match (years.iter().min(), years.iter().max()) {
        (Some(first), Some(last)) => format!("{} - {}", first, last),
        _ => "N/A".to_string(),
    };
    report.metric("Date Range", date_range);

    let episodes: BTreeSet<u32> = films.iter().map(|f| f.episode_id).collect();
    report.metric("Total Episodes", episodes.len().to_string());

    let cast_sizes: Vec<f64> = films.iter().map(|f| f.characters.len() as f64).collect();
    if let Some(avg) = mean(&cast_sizes) {
        report.metric("Avg Characters per Film", format!("{:.1}", avg));
    }

    let producers = split_counts(films.iter().map(|f| f.producer.as_str()));
    report.metric("Unique Producers", producers.len().to_string());

    let mut characters = appearances(films, |f| f.characters.as_slice(), "Character");
    let recurring = characters.iter().filter(|(_, count)| *count > 1).count();
    report.metric("Characters in Multiple Films", recurring.to_string());

    let ordered = by_episode(films);
    let per_film: [(&str, fn(&Film) -> &[String]); 5] = [
        ("Characters", |f| f.characters.as_slice()),
        ("Planets", |f| f.planets.as_slice()),
        ("Starships", |f| f.starships.as_slice()),
        ("Vehicles", |f| f.vehicles.as_slice()),
        ("Species", |f| f.species.as_slice()),
    ];
    for (noun, links) in per_film {
        report.chart(Chart::bar(
            format!("Number of {} per Film", noun),
            ordered
                .iter()
                .map(|&f| (format!("Ep {} {}", f.episode_id, f.title), links(f).len() as f64))
                .collect(),
        ));
    }

    report.chart(Chart::counts(
        "Films by Director",
        value_counts(films.iter().map(|f| f.director.as_str())),
    ));
    report.chart(Chart::counts("Films by Producer", producers));

    characters.truncate(TOP_CHARACTERS);
    report.chart(Chart::counts("Character Appearances Across Films", characters));

    let mut species = appearances(films, |f| f.species.as_slice(), "Species");
    species.truncate(TOP_SPECIES);
    report.chart(Chart::counts("Top 5 Species Across Films", species));

    let mut words = word_frequencies(films);
    words.truncate(TOP_WORDS);
    report.chart(Chart::counts("Word Frequencies in Opening Crawls", words));

    let mut timeline: Vec<(NaiveDate, &Film)> = films
        .iter()
        .filter_map(|f| release_date(f).map(|d| (d, f)))
        .collect();
    timeline.sort_by_key(|(date, _)| *date);
    report.chart(Chart::trend(
        "Character Count Evolution Over Time",
        timeline
            .into_iter()
            .map(|(date, f)| (date.year().to_string(), f.characters.len() as f64))
            .collect(),
    ));

    report
}
