//! Small statistics helpers shared by the category analyses

use std::collections::HashMap;

/// Values SWAPI uses for "no number here"
const MISSING_MARKERS: [&str; 5] = ["", "unknown", "n/a", "none", "indefinite"];

/// Parses a SWAPI numeric string
///
/// Thousands separators are stripped. Placeholders such as `"unknown"` or
/// `"n/a"`, and anything else that is not a finite number, yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if MISSING_MARKERS.contains(&cleaned.to_lowercase().as_str()) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_number`] but only keeps values greater than zero
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Pearson correlation of paired samples
///
/// `None` when there are fewer than two pairs or either side is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Counts occurrences of each label
///
/// Sorted by count (descending), then label (ascending) so ties are stable.
pub fn value_counts<I, S>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.as_ref().to_string()).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Counts the entries of comma-separated list fields
///
/// `"arid, temperate"` contributes one to `arid` and one to `temperate`.
pub fn split_counts<I, S>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = items
        .into_iter()
        .flat_map(|item| {
            item.as_ref()
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
        })
        .collect();
    value_counts(parts)
}

/// Most frequent label, if any
pub fn mode<I, S>(items: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    value_counts(items).into_iter().next().map(|(label, _)| label)
}

/// The `n` items with the largest positive key, descending
///
/// Items whose key is missing or not positive are skipped. Ties keep input
/// order.
pub fn top_n<T>(
    items: &[T],
    n: usize,
    key: impl Fn(&T) -> Option<f64>,
    label: impl Fn(&T) -> String,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = items
        .iter()
        .filter_map(|item| key(item).filter(|v| *v > 0.0).map(|v| (label(item), v)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Mean of a numeric field per group, descending by mean
///
/// Groups without any numeric value are omitted.
pub fn average_by<T>(
    items: &[T],
    group: impl Fn(&T) -> String,
    value: impl Fn(&T) -> Option<f64>,
) -> Vec<(String, f64)> {
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for item in items {
        if let Some(v) = value(item) {
            groups.entry(group(item)).or_default().push(v);
        }
    }
    let mut averages: Vec<(String, f64)> = groups
        .into_iter()
        .filter_map(|(label, values)| mean(&values).map(|m| (label, m)))
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    averages
}

/// Formats a number with thousands separators and no decimals
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

/// Formats an optional value, using "N/A" when absent
pub fn format_or_na(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_handles_swapi_strings() {
        assert_eq!(parse_number("172"), Some(172.0));
        assert_eq!(parse_number("1,358"), Some(1358.0));
        assert_eq!(parse_number(" 0.5 "), Some(0.5));
        assert_eq!(parse_number("unknown"), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("Unknown"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("30-165"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_positive_drops_zero() {
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("12"), Some(12.0));
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_pearson_perfect_and_undefined() {
        let positive = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!((pearson(&positive).unwrap() - 1.0).abs() < 1e-9);

        let negative = [(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)];
        assert!((pearson(&negative).unwrap() + 1.0).abs() < 1e-9);

        assert_eq!(pearson(&[(1.0, 1.0)]), None);
        assert_eq!(pearson(&[(1.0, 5.0), (2.0, 5.0)]), None);
    }

    #[test]
    fn test_value_counts_orders_by_count_then_label() {
        let counts = value_counts(["male", "female", "male", "n/a", "female", "droid"]);
        assert_eq!(
            counts,
            vec![
                ("female".to_string(), 2),
                ("male".to_string(), 2),
                ("droid".to_string(), 1),
                ("n/a".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_split_counts_trims_list_entries() {
        let counts = split_counts(["arid", "temperate, tropical", "arid,temperate", ""]);
        assert_eq!(
            counts,
            vec![
                ("arid".to_string(), 2),
                ("temperate".to_string(), 2),
                ("tropical".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_mode_returns_most_common() {
        assert_eq!(mode(["a", "b", "b"]), Some("b".to_string()));
        assert_eq!(mode(Vec::<String>::new()), None);
    }

    #[test]
    fn test_top_n_skips_missing_and_non_positive() {
        let items = vec![("a", "10"), ("b", "unknown"), ("c", "30"), ("d", "0"), ("e", "20")];
        let top = top_n(&items, 2, |i| parse_number(i.1), |i| i.0.to_string());
        assert_eq!(top, vec![("c".to_string(), 30.0), ("e".to_string(), 20.0)]);
    }

    #[test]
    fn test_average_by_groups_and_sorts() {
        let items = vec![("x", 1.0), ("y", 10.0), ("x", 3.0), ("y", 20.0)];
        let averages = average_by(&items, |i| i.0.to_string(), |i| Some(i.1));
        assert_eq!(averages, vec![("y".to_string(), 15.0), ("x".to_string(), 2.0)]);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-2500.0), "-2,500");
    }

    #[test]
    fn test_format_or_na() {
        assert_eq!(format_or_na(None, |v| format!("{v}")), "N/A");
        assert_eq!(format_or_na(Some(2.0), |v| format!("{v:.1}")), "2.0");
    }
}
