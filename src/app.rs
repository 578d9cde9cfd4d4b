use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::ProfitabilityAnalysis;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::cli::CliArgs;
use crate::interfaces::console::print_report;

pub fn run() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args = CliArgs::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Analysis failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Resolve config, run the analysis and print the report
pub fn execute(args: &CliArgs) -> Result<()> {
    let mut service = ConfigService::new();
    if let Some(path) = &args.config {
        service = service.with_file(path);
    }

    let mut config = service.load()?;
    args.apply(&mut config);

    info!(
        google_play = %config.google_play_path.display(),
        app_store = %config.app_store_path.display(),
        "Starting profitability analysis"
    );

    let report = ProfitabilityAnalysis::new(config).run()?;
    print_report(&report, args.format)
}
