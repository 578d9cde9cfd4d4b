//! Descriptive aggregates over a cleaned catalog
//!
//! Frequency tables of a categorical column, per-key averages of a numeric
//! column, and the spotlight listing of one category.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{
    CategoryAverage, Dataset, FrequencyEntry, FrequencyTable, MetricFormat, Spotlight,
};
use crate::domain::error::{AppError, Result};

/// App listed by the spotlight query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotlightApp {
    pub name: String,
    /// Metric value as written in the export
    pub metric: String,
}

/// Percentage share of each distinct value in `column`
pub fn frequency_table(dataset: &Dataset, column: usize) -> Result<FrequencyTable> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for row in &dataset.rows {
        let value = row.field(column)?;
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let total = dataset.len();
    let entries = order
        .into_iter()
        .map(|value| {
            let count = counts[value];
            FrequencyEntry {
                value: value.to_string(),
                count,
                percentage: (count as f64 / total as f64) * 100.0,
            }
        })
        .collect();

    Ok(FrequencyTable::new(column, total, entries))
}

/// Mean of `value_column` per distinct `key_column` value
///
/// Sorted by average descending, ties by key ascending.
pub fn average_by(
    dataset: &Dataset,
    key_column: usize,
    value_column: usize,
    format: MetricFormat,
) -> Result<Vec<CategoryAverage>> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();

    for row in &dataset.rows {
        let key = row.field(key_column)?;
        let raw = row.field(value_column)?;
        let value = format.parse(raw).map_err(|_| {
            AppError::ParseError(format!(
                "{} row {}: '{}' is not a valid {:?} value",
                dataset.storefront, row.position, raw, format
            ))
        })?;

        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let mut averages: Vec<CategoryAverage> = sums
        .into_iter()
        .map(|(key, (total, count))| CategoryAverage {
            key: key.to_string(),
            average: total / count as f64,
            count,
        })
        .collect();

    averages.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| a.key.cmp(&b.key))
    });
    Ok(averages)
}

/// Apps in the spotlight category whose raw metric is one of the listed values
pub fn spotlight_apps(
    dataset: &Dataset,
    spotlight: &Spotlight,
    name_column: usize,
    category_column: usize,
    metric_column: usize,
) -> Result<Vec<SpotlightApp>> {
    let mut apps = Vec::new();

    for row in &dataset.rows {
        if row.field(category_column)? != spotlight.category {
            continue;
        }
        let metric = row.field(metric_column)?;
        if spotlight.metric_values.iter().any(|v| v == metric) {
            apps.push(SpotlightApp {
                name: row.field(name_column)?.to_string(),
                metric: metric.to_string(),
            });
        }
    }

    Ok(apps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AppRow, Storefront};

    // App, Category, Installs
    fn play(rows: &[(&str, &str, &str)]) -> Dataset {
        Dataset::new(
            Storefront::GooglePlay,
            vec!["App".into(), "Category".into(), "Installs".into()],
            rows.iter()
                .enumerate()
                .map(|(i, (a, c, n))| AppRow::new(i, vec![a.to_string(), c.to_string(), n.to_string()]))
                .collect(),
        )
    }

    #[test]
    fn test_frequency_percentages_sum_to_100() {
        let dataset = play(&[
            ("a", "FAMILY", "10+"),
            ("b", "GAME", "10+"),
            ("c", "FAMILY", "10+"),
            ("d", "TOOLS", "10+"),
            ("e", "FAMILY", "10+"),
            ("f", "GAME", "10+"),
            ("g", "MEDICAL", "10+"),
        ]);
        let table = frequency_table(&dataset, 1).unwrap();

        assert_eq!(table.total, 7);
        assert_eq!(table.len(), 4);
        assert!((table.total_percentage() - 100.0).abs() < 1e-9);
        assert_eq!(table.entries[0].value, "FAMILY");
        assert_eq!(table.entries[0].count, 3);
        assert_eq!(table.sorted()[0].value, "FAMILY");
        assert_eq!(table.sorted()[1].value, "GAME");
    }

    #[test]
    fn test_frequency_of_empty_dataset() {
        let table = frequency_table(&play(&[]), 1).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.total, 0);
    }

    #[test]
    fn test_average_installs_by_category() {
        let dataset = play(&[
            ("a", "BOOKS_AND_REFERENCE", "1,000,000+"),
            ("b", "BOOKS_AND_REFERENCE", "100,000+"),
            ("c", "COMMUNICATION", "1,000,000,000+"),
        ]);
        let averages = average_by(&dataset, 1, 2, MetricFormat::InstallCount).unwrap();

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].key, "COMMUNICATION");
        assert_eq!(averages[0].average, 1_000_000_000.0);
        assert_eq!(averages[1].key, "BOOKS_AND_REFERENCE");
        assert_eq!(averages[1].average, 550_000.0);
        assert_eq!(averages[1].count, 2);
    }

    #[test]
    fn test_average_rejects_bad_metric() {
        let dataset = play(&[("a", "GAME", "Varies with device")]);
        let err = average_by(&dataset, 1, 2, MetricFormat::InstallCount).unwrap_err();
        assert!(err.to_string().contains("Google Play row 0"));
    }

    #[test]
    fn test_average_rejects_nan_metric() {
        let dataset = play(&[("a", "GAME", "1,000+"), ("b", "GAME", "NaN")]);
        let err = average_by(&dataset, 1, 2, MetricFormat::InstallCount).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
        assert!(err.to_string().contains("Google Play row 1"));
    }

    #[test]
    fn test_spotlight_apps() {
        let dataset = play(&[
            ("Wattpad", "BOOKS_AND_REFERENCE", "100,000,000+"),
            ("Bible", "BOOKS_AND_REFERENCE", "1,000,000+"),
            ("Quotes", "BOOKS_AND_REFERENCE", "10,000+"),
            ("Camera", "PHOTOGRAPHY", "1,000,000+"),
            ("Dictionary", "BOOKS_AND_REFERENCE", "10,000,000+"),
        ]);
        let spotlight = Spotlight {
            category: "BOOKS_AND_REFERENCE".to_string(),
            metric_values: vec!["1,000,000+".to_string(), "10,000,000+".to_string()],
        };

        let apps = spotlight_apps(&dataset, &spotlight, 0, 1, 2).unwrap();
        let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Bible", "Dictionary"]);
    }
}
