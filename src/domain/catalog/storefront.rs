// ============================================================
// STOREFRONT LAYOUTS
// ============================================================
// Positional column maps for each catalog export

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Which catalog a dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storefront {
    GooglePlay,
    AppStore,
}

impl std::fmt::Display for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Storefront::GooglePlay => write!(f, "Google Play"),
            Storefront::AppStore => write!(f, "App Store"),
        }
    }
}

/// How a numeric metric column is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFormat {
    /// A bare number, e.g. `21292`
    Plain,
    /// A bucketed install count, e.g. `1,000,000+`
    InstallCount,
}

impl MetricFormat {
    /// Parse a raw metric value into a number
    pub fn parse(&self, raw: &str) -> Result<f64> {
        let cleaned = match self {
            MetricFormat::Plain => raw.to_string(),
            MetricFormat::InstallCount => raw.replace(',', "").replace('+', ""),
        };

        match cleaned.trim().parse::<f64>() {
            // `parse` also accepts "NaN" and "inf", which no column holds
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(AppError::ParseError(format!(
                "'{}' is not a valid {:?} value",
                raw, self
            ))),
        }
    }
}

/// Category slice to list individually, e.g. popular books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spotlight {
    /// Category value to match exactly
    pub category: String,

    /// Raw metric values that qualify (matched as written in the file)
    pub metric_values: Vec<String>,
}

/// Column positions and literals for one storefront export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontLayout {
    /// Column holding the app name
    pub name_column: usize,

    /// Column holding the price
    pub price_column: usize,

    /// Price literal that marks a free app
    pub free_price: String,

    /// Column holding the primary category or genre
    pub category_column: usize,

    /// Optional secondary category column (Google Play `Genres`)
    pub genres_column: Option<usize>,

    /// Numeric column averaged per category
    pub metric_column: usize,

    /// Encoding of the metric column
    pub metric_format: MetricFormat,

    /// Review count column; enables deduplication by max reviews when set
    pub reviews_column: Option<usize>,

    /// Known malformed rows, by position in the data section
    pub malformed_rows: Vec<usize>,

    /// Optional category listing
    pub spotlight: Option<Spotlight>,
}

impl StorefrontLayout {
    /// `googleplaystore.csv`: App, Category, Rating, Reviews, Size, Installs,
    /// Type, Price, Content Rating, Genres, Last Updated, Current Ver, Android Ver
    pub fn google_play() -> Self {
        Self {
            name_column: 0,
            price_column: 7,
            free_price: "0".to_string(),
            category_column: 1,
            genres_column: Some(9),
            metric_column: 5,
            metric_format: MetricFormat::InstallCount,
            reviews_column: Some(3),
            // Row shifted one column left: missing Category
            malformed_rows: vec![10472],
            spotlight: Some(Spotlight {
                category: "BOOKS_AND_REFERENCE".to_string(),
                metric_values: vec![
                    "1,000,000+".to_string(),
                    "5,000,000+".to_string(),
                    "10,000,000+".to_string(),
                    "50,000,000+".to_string(),
                ],
            }),
        }
    }

    /// `AppleStore.csv`: id, track_name, size_bytes, currency, price,
    /// rating_count_tot, rating_count_ver, user_rating, user_rating_ver, ver,
    /// cont_rating, prime_genre, sup_devices.num, ipadSc_urls.num, lang.num, vpp_lic
    pub fn app_store() -> Self {
        Self {
            name_column: 1,
            price_column: 4,
            free_price: "0.0".to_string(),
            category_column: 11,
            genres_column: None,
            metric_column: 5,
            metric_format: MetricFormat::Plain,
            reviews_column: None,
            malformed_rows: Vec::new(),
            spotlight: None,
        }
    }

    pub fn for_storefront(storefront: Storefront) -> Self {
        match storefront {
            Storefront::GooglePlay => Self::google_play(),
            Storefront::AppStore => Self::app_store(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.free_price.is_empty() {
            return Err("free_price must not be empty".to_string());
        }
        if let Some(spotlight) = &self.spotlight {
            if spotlight.category.is_empty() {
                return Err("spotlight.category must not be empty".to_string());
            }
        }
        Ok(())
    }
}
