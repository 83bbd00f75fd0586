use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::check::{CheckSpec, ServiceEndpoint};
use super::extract::truncate;

/// Upper bound, in chars, on every [`CheckResult::detail`]
pub const DETAIL_LIMIT: usize = 200;

/// Terminal state of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Error,
    /// Status mismatch on a soft check
    Warn,
}

impl CheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Error => "ERROR",
            CheckStatus::Warn => "WARN",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✅",
            CheckStatus::Fail => "❌",
            CheckStatus::Error => "⛔",
            CheckStatus::Warn => "⚠️",
        }
    }

    /// `FAIL` and `ERROR` count against the run; `WARN` does not.
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::Fail | CheckStatus::Error)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub service: ServiceEndpoint,
    pub status: CheckStatus,
    pub detail: String,
    #[serde(rename = "latency_ms", serialize_with = "serialize_latency_ms")]
    pub latency: Option<Duration>,
}

impl CheckResult {
    /// Record the outcome of `check`; `detail` is cut to [`DETAIL_LIMIT`].
    pub fn new(
        check: &CheckSpec,
        status: CheckStatus,
        detail: impl AsRef<str>,
        latency: Option<Duration>,
    ) -> Self {
        Self {
            name: check.name.clone(),
            service: check.service.clone(),
            status,
            detail: truncate(detail.as_ref(), DETAIL_LIMIT),
            latency,
        }
    }
}

fn serialize_latency_ms<S>(latency: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match latency {
        Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}

/// Results of one run, in declaration order
#[derive(Debug, Clone, Serialize)]
pub struct HarnessReport {
    pub started_at: DateTime<Utc>,
    results: Vec<CheckResult>,
}

impl HarnessReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn statuses(&self) -> Vec<CheckStatus> {
        self.results.iter().map(|r| r.status).collect()
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status.is_failure())
    }

    /// Distinct services, in the order they were first probed
    pub fn services(&self) -> Vec<&ServiceEndpoint> {
        let mut seen: Vec<&ServiceEndpoint> = Vec::new();
        for result in &self.results {
            if !seen.contains(&&result.service) {
                seen.push(&result.service);
            }
        }
        seen
    }
}

impl Default for HarnessReport {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a HarnessReport {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, service: &ServiceEndpoint) -> CheckSpec {
        CheckSpec::get(name, service, "/health")
    }

    #[test]
    fn detail_is_bounded() {
        let ai = ServiceEndpoint::new("AI", "http://localhost:5001");
        let result = CheckResult::new(&check("AI health", &ai), CheckStatus::Error, "x".repeat(1000), None);
        assert_eq!(result.detail.chars().count(), DETAIL_LIMIT);
    }

    #[test]
    fn counts_and_failures() {
        let ai = ServiceEndpoint::new("AI", "http://localhost:5001");
        let mut report = HarnessReport::new();
        report.push(CheckResult::new(&check("a", &ai), CheckStatus::Pass, "ok", None));
        report.push(CheckResult::new(&check("b", &ai), CheckStatus::Warn, "unexpected status 404", None));
        assert!(!report.has_failures());

        report.push(CheckResult::new(&check("c", &ai), CheckStatus::Fail, "unexpected status 500", None));
        assert!(report.has_failures());
        assert_eq!(report.count(CheckStatus::Pass), 1);
        assert_eq!(report.count(CheckStatus::Warn), 1);
        assert_eq!(report.count(CheckStatus::Fail), 1);
        assert_eq!(report.get("b").map(|r| r.status), Some(CheckStatus::Warn));
    }

    #[test]
    fn services_are_distinct_in_first_seen_order() {
        let ai = ServiceEndpoint::new("AI", "http://localhost:5001");
        let backend = ServiceEndpoint::new("Backend", "http://localhost:5000");
        let mut report = HarnessReport::new();
        for (name, service) in [("1", &ai), ("2", &ai), ("3", &backend), ("4", &ai)] {
            report.push(CheckResult::new(&check(name, service), CheckStatus::Pass, "", None));
        }
        let labels: Vec<_> = report.services().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["AI", "Backend"]);
    }

    #[test]
    fn serializes_uppercase_status_and_latency_ms() {
        let ai = ServiceEndpoint::new("AI", "http://localhost:5001");
        let result = CheckResult::new(
            &check("AI health", &ai),
            CheckStatus::Pass,
            "{}",
            Some(Duration::from_millis(42)),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "PASS");
        assert_eq!(value["latency_ms"], 42);
        assert_eq!(value["service"]["label"], "AI");
    }
}
