use crate::checks::notesmaker_checks;
use crate::cli::{utils, OutputFormat, Outcome};
use crate::config::HarnessConfig;

pub fn handle(config: &HarnessConfig, output_format: OutputFormat) -> anyhow::Result<Outcome> {
    let checks = notesmaker_checks(config)?;
    utils::output_check_list(&output_format, &checks)?;
    Ok(Outcome::Clean)
}
