use std::process::ExitCode;

fn main() -> ExitCode {
    storefront_insights_lib::run()
}
