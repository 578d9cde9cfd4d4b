//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::catalog::AnalysisConfig;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text listings
    #[default]
    Text,
    /// The full report as pretty-printed JSON
    Json,
}

/// Exploratory profitability analysis over Google Play and App Store catalogs
#[derive(Debug, Parser)]
#[command(name = "storefront-insights", version, about)]
pub struct CliArgs {
    /// Google Play export (default: googleplaystore.csv)
    #[arg(long, value_name = "PATH")]
    pub google_play: Option<PathBuf>,

    /// App Store export (default: AppleStore.csv)
    #[arg(long, value_name = "PATH")]
    pub app_store: Option<PathBuf>,

    /// TOML config file (default: storefront-insights.toml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of sample rows printed per dataset
    #[arg(long, value_name = "N")]
    pub explore_rows: Option<usize>,
}

impl CliArgs {
    /// Flags win over config file and environment values
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(path) = &self.google_play {
            config.google_play_path = path.clone();
        }
        if let Some(path) = &self.app_store {
            config.app_store_path = path.clone();
        }
        if let Some(rows) = self.explore_rows {
            config.explore_rows = rows;
        }
    }
}
