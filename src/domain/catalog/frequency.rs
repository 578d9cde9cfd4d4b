// ============================================================
// FREQUENCY & AVERAGE TABLES
// ============================================================
// Aggregates keyed by categorical column values

use serde::{Deserialize, Serialize};

/// Share of rows holding one column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
    /// Percentage of all rows (0.0 - 100.0)
    pub percentage: f64,
}

/// Mapping from column value to its percentage share of rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    /// Column the table was built from
    pub column: usize,

    /// Number of rows tabulated
    pub total: usize,

    /// Entries in first-seen order
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn new(column: usize, total: usize, entries: Vec<FrequencyEntry>) -> Self {
        Self {
            column,
            total,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn percentage_of(&self, value: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.percentage)
    }

    /// Sum of all percentages; 100.0 up to rounding for a non-empty table
    pub fn total_percentage(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).sum()
    }

    /// Entries ordered by percentage descending, ties by value descending
    pub fn sorted(&self) -> Vec<&FrequencyEntry> {
        let mut entries: Vec<&FrequencyEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| {
            b.percentage
                .total_cmp(&a.percentage)
                .then_with(|| b.value.cmp(&a.value))
        });
        entries
    }
}

/// Mean of a numeric column for one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverage {
    pub key: String,
    pub average: f64,
    /// Rows contributing to the average
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str, count: usize, total: usize) -> FrequencyEntry {
        FrequencyEntry {
            value: value.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        }
    }

    #[test]
    fn test_sorted_descending_with_value_tiebreak() {
        let table = FrequencyTable::new(
            1,
            6,
            vec![
                entry("GAME", 1, 6),
                entry("FAMILY", 3, 6),
                entry("TOOLS", 1, 6),
                entry("BOOKS", 1, 6),
            ],
        );

        let order: Vec<&str> = table.sorted().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(order, vec!["FAMILY", "TOOLS", "GAME", "BOOKS"]);
    }

    #[test]
    fn test_percentage_lookup() {
        let table = FrequencyTable::new(11, 4, vec![entry("Games", 3, 4), entry("Music", 1, 4)]);
        assert_eq!(table.percentage_of("Games"), Some(75.0));
        assert_eq!(table.percentage_of("Weather"), None);
        assert!((table.total_percentage() - 100.0).abs() < 1e-9);
    }
}
