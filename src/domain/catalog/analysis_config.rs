// ============================================================
// ANALYSIS CONFIGURATION
// ============================================================
// Input locations, storefront layouts and filter thresholds

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{Storefront, StorefrontLayout};

/// Configuration for one profitability analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Google Play export (default: googleplaystore.csv)
    pub google_play_path: PathBuf,

    /// App Store export (default: AppleStore.csv)
    pub app_store_path: PathBuf,

    pub google_play: StorefrontLayout,

    pub app_store: StorefrontLayout,

    /// Number of sample rows shown when exploring a dataset (default: 3)
    pub explore_rows: usize,

    /// Most non-ASCII characters a name may hold and still count as English (default: 3)
    pub max_non_ascii: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            google_play_path: PathBuf::from("googleplaystore.csv"),
            app_store_path: PathBuf::from("AppleStore.csv"),
            google_play: StorefrontLayout::for_storefront(Storefront::GooglePlay),
            app_store: StorefrontLayout::for_storefront(Storefront::AppStore),
            explore_rows: 3,
            max_non_ascii: 3,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self, storefront: Storefront) -> &StorefrontLayout {
        match storefront {
            Storefront::GooglePlay => &self.google_play,
            Storefront::AppStore => &self.app_store,
        }
    }

    pub fn path(&self, storefront: Storefront) -> &Path {
        match storefront {
            Storefront::GooglePlay => &self.google_play_path,
            Storefront::AppStore => &self.app_store_path,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.google_play_path.as_os_str().is_empty() {
            return Err("google_play_path must not be empty".to_string());
        }
        if self.app_store_path.as_os_str().is_empty() {
            return Err("app_store_path must not be empty".to_string());
        }
        self.google_play
            .validate()
            .map_err(|e| format!("google_play: {}", e))?;
        self.app_store
            .validate()
            .map_err(|e| format!("app_store: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_both_exports() {
        let config = AnalysisConfig::default();
        assert_eq!(config.path(Storefront::GooglePlay), Path::new("googleplaystore.csv"));
        assert_eq!(config.path(Storefront::AppStore), Path::new("AppleStore.csv"));
        assert_eq!(config.layout(Storefront::AppStore).free_price, "0.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_free_price() {
        let mut config = AnalysisConfig::default();
        config.app_store.free_price.clear();

        let err = config.validate().unwrap_err();
        assert_eq!(err, "app_store: free_price must not be empty");
    }
}
