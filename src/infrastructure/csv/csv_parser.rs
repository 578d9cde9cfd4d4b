// ============================================================
// CSV PARSER
// ============================================================
// Read a storefront export into a positional Dataset

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::domain::catalog::{AppRow, Dataset, Storefront};
use crate::domain::error::{AppError, Result};

/// CSV parser with encoding fallback
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values (default: false)
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Load a whole export file
    pub fn parse_file(&self, path: &Path, storefront: Storefront) -> Result<Dataset> {
        let content = self.read_with_encoding_detection(path)?;
        let dataset = self.parse_content(&content, storefront).map_err(|e| match e {
            AppError::ParseError(msg) => {
                AppError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        debug!(
            storefront = %storefront,
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.header.len(),
            "Loaded export"
        );
        Ok(dataset)
    }

    /// Parse CSV content; the first record is the header
    pub fn parse_content(&self, content: &str, storefront: Storefront) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Known bad rows are short by one column
            .from_reader(content.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if header.is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} export has no header row",
                storefront
            )));
        }

        let mut rows = Vec::new();
        for (position, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", position + 1, e))
            })?;
            rows.push(AppRow::new(position, record.iter().map(str::to_string).collect()));
        }

        Ok(Dataset::new(storefront, header, rows))
    }

    /// Read file as UTF-8, falling back to Windows-1252
    fn read_with_encoding_detection(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("CSV file {}", path.display()))
            }
            _ => AppError::IoError(format!("Failed to open {}: {}", path.display(), e)),
        })?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

        match String::from_utf8(buffer) {
            Ok(content) => Ok(content),
            Err(err) => {
                let bytes = err.into_bytes();
                let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
                warn!(
                    path = %path.display(),
                    lossy = had_errors,
                    "File is not valid UTF-8, decoded as Windows-1252"
                );
                Ok(decoded.into_owned())
            }
        }
    }
}
