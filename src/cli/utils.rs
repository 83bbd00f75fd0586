use serde_json::json;

use crate::cli::OutputFormat;
use crate::harness::{self, CheckSpec, HarnessReport};

/// Output a finished report in the appropriate format
pub fn output_report(output_format: &OutputFormat, report: &HarnessReport) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", harness::to_json(report)?),
        OutputFormat::Text => harness::print_summary(report),
    }
    Ok(())
}

/// Output the planned checks in the appropriate format
pub fn output_check_list(output_format: &OutputFormat, checks: &[CheckSpec]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let plan: Vec<_> = checks
                .iter()
                .map(|check| {
                    json!({
                        "name": check.name,
                        "service": check.service,
                        "method": check.method.as_str(),
                        "url": check.url,
                        "timeout_secs": check.timeout.as_secs_f64(),
                        "expected_status": check.expected_status,
                        "severity": check.severity,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "checks": plan }))?);
        }
        OutputFormat::Text => {
            for (index, check) in checks.iter().enumerate() {
                println!(
                    "{:>2}. {:<26} {:<4} {} ({}s)",
                    index + 1,
                    check.name,
                    check.method.as_str(),
                    check.url,
                    check.timeout.as_secs()
                );
            }
        }
    }
    Ok(())
}
