pub mod use_cases;

pub use use_cases::profitability_analysis::{
    AnalysisReport, ProfitabilityAnalysis, StageCounts, StorefrontReport,
};
