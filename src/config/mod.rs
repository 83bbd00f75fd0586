use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_AI_URL: &str = "http://localhost:5001";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5174";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub services: ServiceUrls,
    pub timeouts: TimeoutConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUrls {
    pub backend_base_url: String,
    pub ai_base_url: String,
    pub frontend_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Health, listing and frontend checks
    pub health_secs: u64,
    /// AI `/analyze` calls, which run a model
    pub analyze_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub concurrent: bool,
    pub extended: bool,
    pub strict: bool,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            ai_base_url: DEFAULT_AI_URL.to_string(),
            frontend_base_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            health_secs: 5,
            analyze_secs: 10,
        }
    }
}

impl TimeoutConfig {
    pub fn health(&self) -> Duration {
        Duration::from_secs(self.health_secs)
    }

    pub fn analyze(&self) -> Duration {
        Duration::from_secs(self.analyze_secs)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            services: ServiceUrls::default(),
            timeouts: TimeoutConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// Values that fail to parse leave the current setting in place.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service overrides
        if let Some(v) = lookup("NOTESMAKER_BACKEND_URL") {
            self.services.backend_base_url = v;
        }
        if let Some(v) = lookup("NOTESMAKER_AI_URL") {
            self.services.ai_base_url = v;
        }
        if let Some(v) = lookup("NOTESMAKER_FRONTEND_URL") {
            self.services.frontend_base_url = v;
        }

        // Timeout overrides
        if let Some(v) = lookup("SMOKE_HEALTH_TIMEOUT_SECS") {
            self.timeouts.health_secs = v.parse().unwrap_or(self.timeouts.health_secs);
        }
        if let Some(v) = lookup("SMOKE_ANALYZE_TIMEOUT_SECS") {
            self.timeouts.analyze_secs = v.parse().unwrap_or(self.timeouts.analyze_secs);
        }

        // Run overrides
        if let Some(v) = lookup("SMOKE_CONCURRENT") {
            self.run.concurrent = parse_flag(&v).unwrap_or(self.run.concurrent);
        }
        if let Some(v) = lookup("SMOKE_EXTENDED") {
            self.run.extended = parse_flag(&v).unwrap_or(self.run.extended);
        }
        if let Some(v) = lookup("SMOKE_STRICT") {
            self.run.strict = parse_flag(&v).unwrap_or(self.run.strict);
        }

        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Environment view, read once. CLI flags are layered on a clone of this.
pub static CONFIG: Lazy<HarnessConfig> = Lazy::new(HarnessConfig::from_env);

pub fn config() -> &'static HarnessConfig {
    &CONFIG
}
