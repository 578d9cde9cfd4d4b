// ============================================================
// APP ROW & DATASET
// ============================================================
// Positional records as read from a storefront export

use serde::{Deserialize, Serialize};

use super::Storefront;
use crate::domain::error::{AppError, Result};

/// One application's data as a positional field sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRow {
    /// 0-based position in the data section of the source file (header excluded)
    pub position: usize,

    /// Raw field values, in file order
    pub fields: Vec<String>,
}

impl AppRow {
    pub fn new(position: usize, fields: Vec<String>) -> Self {
        Self { position, fields }
    }

    /// Get a field by column index
    pub fn field(&self, column: usize) -> Result<&str> {
        self.fields.get(column).map(String::as_str).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Row {} has no column {} ({} fields)",
                self.position,
                column,
                self.fields.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered table of rows sharing one header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub storefront: Storefront,
    pub header: Vec<String>,
    pub rows: Vec<AppRow>,
}

impl Dataset {
    pub fn new(storefront: Storefront, header: Vec<String>, rows: Vec<AppRow>) -> Self {
        Self {
            storefront,
            header,
            rows,
        }
    }

    /// Build a dataset with the same storefront and header but different rows
    pub fn with_rows(&self, rows: Vec<AppRow>) -> Self {
        Self {
            storefront: self.storefront,
            header: self.header.clone(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, taken from the first data row
    /// Falls back to the header width for an empty dataset
    pub fn column_count(&self) -> usize {
        self.rows
            .first()
            .map(AppRow::len)
            .unwrap_or(self.header.len())
    }

    /// Rows in `start..end`, clamped to the dataset bounds
    pub fn slice(&self, start: usize, end: usize) -> &[AppRow] {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        &self.rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(position: usize, fields: &[&str]) -> AppRow {
        AppRow::new(position, fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn test_field_out_of_range() {
        let r = row(7, &["Photo Editor", "ART_AND_DESIGN"]);
        assert_eq!(r.field(1).unwrap(), "ART_AND_DESIGN");

        let err = r.field(5).unwrap_err();
        assert!(err.to_string().contains("Row 7 has no column 5"));
    }

    #[test]
    fn test_slice_is_clamped() {
        let dataset = Dataset::new(
            Storefront::GooglePlay,
            vec!["App".to_string()],
            vec![row(0, &["a"]), row(1, &["b"])],
        );

        assert_eq!(dataset.slice(0, 3).len(), 2);
        assert_eq!(dataset.slice(1, 2)[0].fields[0], "b");
        assert!(dataset.slice(5, 9).is_empty());
    }

    #[test]
    fn test_column_count_falls_back_to_header() {
        let empty = Dataset::new(
            Storefront::AppStore,
            vec!["id".to_string(), "track_name".to_string()],
            Vec::new(),
        );
        assert_eq!(empty.column_count(), 2);

        let filled = empty.with_rows(vec![row(0, &["1", "a", "extra"])]);
        assert_eq!(filled.column_count(), 3);
        assert_eq!(filled.header.len(), 2);
    }
}
