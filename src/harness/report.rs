//! Human-readable and JSON rendering of a [`HarnessReport`]

use std::fmt;

use super::result::{CheckStatus, HarnessReport};

const RULE_WIDTH: usize = 60;

/// Render the report: one line per check, a tally, then the service footer.
pub fn summarize(report: &HarnessReport) -> String {
    report.to_string()
}

pub fn print_summary(report: &HarnessReport) {
    print!("{}", summarize(report));
}

pub fn to_json(report: &HarnessReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🧪 Testing NotesMaker services ({} checks)", self.len())?;
        writeln!(f)?;

        for (index, result) in self.iter().enumerate() {
            write!(
                f,
                "{:>2}. {} {:<5} {}",
                index + 1,
                result.status.glyph(),
                result.status.label(),
                result.name
            )?;
            if !result.detail.is_empty() {
                write!(f, ": {}", result.detail)?;
            }
            if let Some(latency) = result.latency {
                write!(f, " ({} ms)", latency.as_millis())?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{} passed, {} failed, {} errors, {} warnings",
            self.count(CheckStatus::Pass),
            self.count(CheckStatus::Fail),
            self.count(CheckStatus::Error),
            self.count(CheckStatus::Warn)
        )?;

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "🎉 Test Summary:")?;
        for service in self.services() {
            writeln!(f, "   {:<10}{}", format!("{}:", service.label), service.base_url)?;
        }
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}
