use anyhow::Context;
use product_api_e2e::configuration::get_configuration;
use product_api_e2e::scenarios::run_suite;
use product_api_e2e::telemetry::{get_subscriber, init_subscriber};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let subscriber = get_subscriber("product_api_e2e".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let credentials = configuration
        .credentials
        .credentials()
        .map_err(anyhow::Error::msg)
        .context("Invalid fixture credentials.")?;
    let client = configuration
        .api
        .client()
        .context("Failed to build the API client.")?;

    let report = run_suite(client, &credentials)
        .await
        .context("The suite could not be set up against the target API.")?;

    for failure in report.failures() {
        if let Err(e) = &failure.result {
            eprintln!("FAILED {}: {}", failure.name, e);
        }
    }
    eprintln!(
        "{} passed, {} failed",
        report.outcomes.len() - report.failures().count(),
        report.failures().count()
    );

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
