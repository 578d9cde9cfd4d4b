pub mod audience_filter;
pub mod catalog_cleaning;
pub mod catalog_stats;
pub mod profitability_analysis;
