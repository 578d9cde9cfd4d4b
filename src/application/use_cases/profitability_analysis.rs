// ============================================================
// PROFITABILITY ANALYSIS USE CASE
// ============================================================
// Orchestrate loading, cleaning, audience filtering and aggregation
// for both storefront catalogs

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::audience_filter::{filter_english, filter_free};
use super::catalog_cleaning::{
    deduplicate_by_max_reviews, find_duplicates, remove_rows_at, DuplicateSummary,
};
use super::catalog_stats::{average_by, frequency_table, spotlight_apps, SpotlightApp};
use crate::domain::catalog::{
    AnalysisConfig, AppRow, CategoryAverage, Dataset, FrequencyTable, Storefront,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;

/// First rows and dimensions of a freshly loaded dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSample {
    pub header: Vec<String>,
    pub rows: Vec<AppRow>,
    pub row_count: usize,
    pub column_count: usize,
}

/// Row counts after each pipeline stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub loaded: usize,
    pub after_malformed: usize,
    pub after_dedup: usize,
    pub after_english: usize,
    pub after_free: usize,
}

/// Everything computed for one storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontReport {
    pub storefront: Storefront,
    pub sample: DatasetSample,
    /// Malformed rows removed by position
    pub removed_rows: Vec<AppRow>,
    /// Present when the layout deduplicates by reviews
    pub duplicates: Option<DuplicateSummary>,
    pub stages: StageCounts,
    /// Header name of the primary category column
    pub category_name: String,
    pub category_frequencies: FrequencyTable,
    pub genres_name: Option<String>,
    pub genre_frequencies: Option<FrequencyTable>,
    /// Header name of the averaged metric column
    pub metric_name: String,
    pub category_averages: Vec<CategoryAverage>,
    pub spotlight_category: Option<String>,
    pub spotlight: Vec<SpotlightApp>,
}

/// Result of a full run over both catalogs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub google_play: StorefrontReport,
    pub app_store: StorefrontReport,
    /// Processing time in milliseconds
    pub elapsed_ms: u64,
}

/// Profitability analysis use case
pub struct ProfitabilityAnalysis {
    config: AnalysisConfig,
}

impl ProfitabilityAnalysis {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(AnalysisConfig::default())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load both exports from disk and analyze them
    pub fn run(&self) -> Result<AnalysisReport> {
        self.config.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid analysis config: {}", e))
        })?;

        let parser = CsvParser::new();
        let android = parser.parse_file(
            self.config.path(Storefront::GooglePlay),
            Storefront::GooglePlay,
        )?;
        let ios = parser.parse_file(self.config.path(Storefront::AppStore), Storefront::AppStore)?;

        self.run_on(&android, &ios)
    }

    /// Analyze datasets that are already in memory
    pub fn run_on(&self, android: &Dataset, ios: &Dataset) -> Result<AnalysisReport> {
        let start = Instant::now();

        let google_play = self.analyze_storefront(android)?;
        let app_store = self.analyze_storefront(ios)?;

        let elapsed = start.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "Analysis finished");

        Ok(AnalysisReport {
            google_play,
            app_store,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }

    fn analyze_storefront(&self, dataset: &Dataset) -> Result<StorefrontReport> {
        let storefront = dataset.storefront;
        let layout = self.config.layout(storefront);

        let sample = DatasetSample {
            header: dataset.header.clone(),
            rows: dataset.slice(0, self.config.explore_rows).to_vec(),
            row_count: dataset.len(),
            column_count: dataset.column_count(),
        };

        let mut stages = StageCounts {
            loaded: dataset.len(),
            ..Default::default()
        };

        let (cleaned, removed_rows) = remove_rows_at(dataset, &layout.malformed_rows)?;
        stages.after_malformed = cleaned.len();

        let (deduplicated, duplicates) = match layout.reviews_column {
            Some(reviews_column) => {
                let summary = find_duplicates(&cleaned, layout.name_column)?;
                let clean = deduplicate_by_max_reviews(&cleaned, layout.name_column, reviews_column)?;
                (clean, Some(summary))
            }
            None => (cleaned, None),
        };
        stages.after_dedup = deduplicated.len();

        let english = filter_english(&deduplicated, layout.name_column, self.config.max_non_ascii)?;
        stages.after_english = english.len();

        let free = filter_free(&english, layout.price_column, &layout.free_price)?;
        stages.after_free = free.len();

        info!(
            storefront = %storefront,
            loaded = stages.loaded,
            after_malformed = stages.after_malformed,
            after_dedup = stages.after_dedup,
            after_english = stages.after_english,
            after_free = stages.after_free,
            "Cleaned and filtered catalog"
        );

        let category_frequencies = frequency_table(&free, layout.category_column)?;
        let genre_frequencies = layout
            .genres_column
            .map(|column| frequency_table(&free, column))
            .transpose()?;

        let category_averages = average_by(
            &free,
            layout.category_column,
            layout.metric_column,
            layout.metric_format,
        )?;

        let spotlight = match &layout.spotlight {
            Some(spotlight) => spotlight_apps(
                &free,
                spotlight,
                layout.name_column,
                layout.category_column,
                layout.metric_column,
            )?,
            None => Vec::new(),
        };

        Ok(StorefrontReport {
            storefront,
            sample,
            removed_rows,
            duplicates,
            stages,
            category_name: column_name(dataset, layout.category_column),
            category_frequencies,
            genres_name: layout.genres_column.map(|c| column_name(dataset, c)),
            genre_frequencies,
            metric_name: column_name(dataset, layout.metric_column),
            category_averages,
            spotlight_category: layout.spotlight.as_ref().map(|s| s.category.clone()),
            spotlight,
        })
    }
}

impl Default for ProfitabilityAnalysis {
    fn default() -> Self {
        Self::default_config()
    }
}

fn column_name(dataset: &Dataset, column: usize) -> String {
    dataset
        .header
        .get(column)
        .cloned()
        .unwrap_or_else(|| format!("column {}", column))
}
