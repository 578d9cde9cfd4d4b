//! Catalog cleaning
//!
//! - Removal of hand-identified malformed rows by position
//! - Duplicate detection by app name
//! - Deduplication keeping the most-reviewed row per name

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::catalog::{AppRow, Dataset};
use crate::domain::error::{AppError, Result};

/// Duplicate names found before deduplication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSummary {
    /// Distinct names
    pub unique_count: usize,
    /// Every occurrence after the first, in input order
    pub duplicate_names: Vec<String>,
}

impl DuplicateSummary {
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_names.len()
    }
}

/// Remove rows at the given indices of `dataset.rows`
///
/// Indices refer to the dataset as passed in, so removing several rows at
/// once does not shift the later ones. Returns the cleaned dataset and the
/// removed rows in their original order. An index past the end means the
/// export no longer matches the known layout and fails the run.
pub fn remove_rows_at(dataset: &Dataset, indices: &[usize]) -> Result<(Dataset, Vec<AppRow>)> {
    let mut targets = HashSet::new();
    for &index in indices {
        if index >= dataset.len() {
            warn!(
                storefront = %dataset.storefront,
                index,
                rows = dataset.len(),
                "Malformed row index is past the end of the dataset"
            );
            return Err(AppError::ValidationError(format!(
                "{} malformed row {} is out of range ({} rows)",
                dataset.storefront,
                index,
                dataset.len()
            )));
        }
        targets.insert(index);
    }

    let mut kept = Vec::with_capacity(dataset.len());
    let mut removed = Vec::new();

    for (index, row) in dataset.rows.iter().enumerate() {
        if targets.contains(&index) {
            if row.len() != dataset.header.len() {
                info!(
                    storefront = %dataset.storefront,
                    index,
                    fields = row.len(),
                    expected = dataset.header.len(),
                    "Removing row with wrong field count"
                );
            }
            removed.push(row.clone());
        } else {
            kept.push(row.clone());
        }
    }

    Ok((dataset.with_rows(kept), removed))
}

/// Count distinct names and list repeated occurrences
pub fn find_duplicates(dataset: &Dataset, name_column: usize) -> Result<DuplicateSummary> {
    let mut seen = HashSet::new();
    let mut duplicate_names = Vec::new();

    for row in &dataset.rows {
        let name = row.field(name_column)?;
        if !seen.insert(name) {
            duplicate_names.push(name.to_string());
        }
    }

    Ok(DuplicateSummary {
        unique_count: seen.len(),
        duplicate_names,
    })
}

fn review_count(dataset: &Dataset, row: &AppRow, reviews_column: usize) -> Result<f64> {
    let raw = row.field(reviews_column)?;
    match raw.trim().parse::<f64>() {
        // NaN never equals the max, which would drop every row for the name
        Ok(n_reviews) if n_reviews.is_finite() => Ok(n_reviews),
        _ => Err(AppError::ParseError(format!(
            "{} row {}: review count '{}' is not a number",
            dataset.storefront, row.position, raw
        ))),
    }
}

/// Highest review count seen for each app name
pub fn max_reviews_by_name(
    dataset: &Dataset,
    name_column: usize,
    reviews_column: usize,
) -> Result<HashMap<String, f64>> {
    let mut reviews_max: HashMap<String, f64> = HashMap::new();

    for row in &dataset.rows {
        let name = row.field(name_column)?;
        let n_reviews = review_count(dataset, row, reviews_column)?;

        match reviews_max.get_mut(name) {
            Some(max) if *max < n_reviews => *max = n_reviews,
            Some(_) => {}
            None => {
                reviews_max.insert(name.to_string(), n_reviews);
            }
        }
    }

    Ok(reviews_max)
}

/// Keep one row per name: the first one carrying the maximum review count
pub fn deduplicate_by_max_reviews(
    dataset: &Dataset,
    name_column: usize,
    reviews_column: usize,
) -> Result<Dataset> {
    let reviews_max = max_reviews_by_name(dataset, name_column, reviews_column)?;

    let mut already_added = HashSet::with_capacity(reviews_max.len());
    let mut clean = Vec::with_capacity(reviews_max.len());

    for row in &dataset.rows {
        let name = row.field(name_column)?;
        let n_reviews = review_count(dataset, row, reviews_column)?;

        if reviews_max.get(name) == Some(&n_reviews) && !already_added.contains(name) {
            already_added.insert(name);
            clean.push(row.clone());
        }
    }

    debug!(
        storefront = %dataset.storefront,
        before = dataset.len(),
        after = clean.len(),
        "Deduplicated by max reviews"
    );
    Ok(dataset.with_rows(clean))
}
