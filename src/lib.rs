mod app;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::{execute, run};
pub use application::{AnalysisReport, ProfitabilityAnalysis};
pub use domain::catalog::AnalysisConfig;
pub use domain::error::{AppError, Result};
