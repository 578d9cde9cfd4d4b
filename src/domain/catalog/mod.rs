// ============================================================
// CATALOG DOMAIN LAYER
// ============================================================
// Rows, datasets, storefront layouts and aggregate value objects
// No I/O, no logging

mod analysis_config;
mod app_row;
mod frequency;
mod storefront;

pub use analysis_config::AnalysisConfig;
pub use app_row::{AppRow, Dataset};
pub use frequency::{CategoryAverage, FrequencyEntry, FrequencyTable};
pub use storefront::{MetricFormat, Spotlight, Storefront, StorefrontLayout};
