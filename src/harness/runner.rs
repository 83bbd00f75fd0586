use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{info, warn};

use super::check::{CheckSpec, ServiceEndpoint, Severity};
use super::client::{HttpClient, ReqwestClient};
use super::result::{CheckResult, CheckStatus, HarnessReport};
use crate::error::ConfigError;

/// Executes checks and collects one [`CheckResult`] per check
#[derive(Clone)]
pub struct Runner {
    client: Arc<dyn HttpClient>,
}

impl Runner {
    pub fn new(client: impl HttpClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn with_reqwest() -> Result<Self, reqwest::Error> {
        Ok(Self::new(ReqwestClient::new()?))
    }

    /// Run every check once, in order.
    ///
    /// Per-check problems end up in the report. Only a malformed check list
    /// is an error, and that is detected before anything is sent.
    pub async fn run(&self, checks: &[CheckSpec]) -> Result<HarnessReport, ConfigError> {
        validate(checks)?;

        let mut report = HarnessReport::new();
        for check in checks {
            report.push(self.execute(check).await);
        }
        Ok(report)
    }

    /// Like [`Runner::run`], but services are probed concurrently. Checks
    /// against one service still run in declared order, and the report is
    /// returned in declared order.
    pub async fn run_concurrent(&self, checks: &[CheckSpec]) -> Result<HarnessReport, ConfigError> {
        validate(checks)?;

        let mut groups: Vec<(&ServiceEndpoint, Vec<usize>)> = Vec::new();
        for (index, check) in checks.iter().enumerate() {
            match groups.iter_mut().find(|(service, _)| *service == &check.service) {
                Some((_, indices)) => indices.push(index),
                None => groups.push((&check.service, vec![index])),
            }
        }

        let lanes = groups.into_iter().map(|(_, indices)| async move {
            let mut done = Vec::with_capacity(indices.len());
            for index in indices {
                done.push((index, self.execute(&checks[index]).await));
            }
            done
        });

        let mut finished: Vec<(usize, CheckResult)> = join_all(lanes).await.into_iter().flatten().collect();
        finished.sort_by_key(|(index, _)| *index);

        let mut report = HarnessReport::new();
        for (_, result) in finished {
            report.push(result);
        }
        Ok(report)
    }

    /// Run a single check. Never fails; every outcome becomes a result.
    pub async fn execute(&self, check: &CheckSpec) -> CheckResult {
        let started = Instant::now();

        let response = match self.client.send(check).await {
            Ok(response) => response,
            Err(err) => {
                warn!("{} errored: {}", check.name, err);
                return CheckResult::new(check, CheckStatus::Error, err.to_string(), None);
            }
        };
        let latency = Some(started.elapsed());

        if response.status != check.expected_status {
            let status = match check.severity {
                Severity::Hard => CheckStatus::Fail,
                Severity::Soft => CheckStatus::Warn,
            };
            warn!(
                "{} returned status {} (expected {})",
                check.name, response.status, check.expected_status
            );
            return CheckResult::new(
                check,
                status,
                format!("unexpected status {}", response.status),
                latency,
            );
        }

        match check.extractor.extract(response.status, &response.body) {
            Ok(snippet) => {
                info!("{} passed in {:?}", check.name, started.elapsed());
                CheckResult::new(check, CheckStatus::Pass, snippet, latency)
            }
            Err(err) => {
                warn!("{} body could not be parsed: {}", check.name, err);
                CheckResult::new(
                    check,
                    CheckStatus::Fail,
                    format!("could not parse response: {}", err),
                    latency,
                )
            }
        }
    }
}

/// Fail fast on input that makes the whole run meaningless
pub fn validate(checks: &[CheckSpec]) -> Result<(), ConfigError> {
    if checks.is_empty() {
        return Err(ConfigError::EmptyCheckList);
    }
    checks.iter().try_for_each(CheckSpec::validate)
}
