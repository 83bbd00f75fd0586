use tracing::info;

use crate::checks::notesmaker_checks;
use crate::cli::{utils, OutputFormat, Outcome};
use crate::config::HarnessConfig;
use crate::harness::Runner;

pub async fn handle(config: &HarnessConfig, output_format: OutputFormat) -> anyhow::Result<Outcome> {
    let checks = notesmaker_checks(config)?;
    let runner = Runner::with_reqwest()?;

    info!(
        "running {} checks ({})",
        checks.len(),
        if config.run.concurrent { "concurrent" } else { "sequential" }
    );
    let report = if config.run.concurrent {
        runner.run_concurrent(&checks).await?
    } else {
        runner.run(&checks).await?
    };

    utils::output_report(&output_format, &report)?;

    if config.run.strict && report.has_failures() {
        Ok(Outcome::ChecksFailed)
    } else {
        Ok(Outcome::Clean)
    }
}
