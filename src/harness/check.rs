use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::extract::Extractor;
use crate::error::ConfigError;

/// Timeout applied when a check does not set its own
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A remote service probed by one or more checks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServiceEndpoint {
    pub label: String,
    pub base_url: String,
}

impl ServiceEndpoint {
    /// Build an endpoint, trimming any trailing `/` so paths join cleanly.
    pub fn new(label: impl Into<String>, base_url: impl AsRef<str>) -> Self {
        Self {
            label: label.into(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// Like [`ServiceEndpoint::new`], but rejects anything that is not an
    /// absolute http(s) URL with a host.
    pub fn parse(label: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = base_url.as_ref();
        if let Err(reason) = check_absolute_http(raw) {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw.to_string(),
                reason,
            });
        }
        Ok(Self::new(label, raw))
    }

    /// Resolve `path` (which should start with `/`) against this service.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// How a status mismatch is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Mismatch is a `FAIL`
    #[default]
    Hard,
    /// Mismatch is a `WARN`; the check is informational
    Soft,
}

/// One declared HTTP probe
#[derive(Debug, Clone)]
pub struct CheckSpec {
    pub name: String,
    pub service: ServiceEndpoint,
    pub method: Method,
    pub url: String,
    pub payload: Option<Value>,
    pub timeout: Duration,
    pub expected_status: u16,
    pub severity: Severity,
    pub extractor: Extractor,
}

impl CheckSpec {
    pub fn new(
        name: impl Into<String>,
        service: &ServiceEndpoint,
        method: Method,
        path: &str,
    ) -> Self {
        Self {
            name: name.into(),
            service: service.clone(),
            method,
            url: service.url(path),
            payload: None,
            timeout: DEFAULT_TIMEOUT,
            expected_status: 200,
            severity: Severity::Hard,
            extractor: Extractor::None,
        }
    }

    pub fn get(name: impl Into<String>, service: &ServiceEndpoint, path: &str) -> Self {
        Self::new(name, service, Method::GET, path)
    }

    pub fn post(
        name: impl Into<String>,
        service: &ServiceEndpoint,
        path: &str,
        payload: Value,
    ) -> Self {
        let mut check = Self::new(name, service, Method::POST, path);
        check.payload = Some(payload);
        check
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn soft(mut self) -> Self {
        self.severity = Severity::Soft;
        self
    }

    pub fn extract(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Reject checks that could never be sent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(reason) = check_absolute_http(&self.url) {
            return Err(ConfigError::InvalidUrl {
                check: self.name.clone(),
                url: self.url.clone(),
                reason,
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                check: self.name.clone(),
            });
        }
        Ok(())
    }
}

fn check_absolute_http(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(())
}
