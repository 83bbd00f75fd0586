//! The NotesMaker check battery

use serde_json::{json, Value};

use crate::config::HarnessConfig;
use crate::error::ConfigError;
use crate::harness::{CheckSpec, Extractor, ServiceEndpoint};

pub const SUMMARY_LIMIT: usize = 150;
pub const EXPLANATION_LIMIT: usize = 200;

pub const SUMMARIZE_SAMPLE: &str = "\
Artificial Intelligence is transforming the way we work and live. \
Machine learning algorithms can now process vast amounts of data quickly. \
Natural language processing enables computers to understand human language. \
Deep learning models have achieved remarkable results in image recognition. \
AI is being used in healthcare, finance, education, and many other fields. \
However, there are also concerns about privacy and job displacement. \
The future of AI depends on how we develop and deploy these technologies.";

pub const REWRITE_SAMPLE: &str =
    "The cat was sitting on the mat. The weather was very nice today.";

pub const EXPLAIN_SAMPLE: &str = "Quantum computing uses quantum bits or qubits. \
These can exist in multiple states simultaneously through superposition.";

/// The three probed services, resolved from configuration
#[derive(Debug, Clone)]
pub struct Services {
    pub backend: ServiceEndpoint,
    pub ai: ServiceEndpoint,
    pub frontend: ServiceEndpoint,
}

impl Services {
    pub fn from_config(config: &HarnessConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            backend: ServiceEndpoint::parse("Backend", &config.services.backend_base_url)?,
            ai: ServiceEndpoint::parse("AI", &config.services.ai_base_url)?,
            frontend: ServiceEndpoint::parse("Frontend", &config.services.frontend_base_url)?,
        })
    }
}

fn analyze_payload(action: &str, content: &str) -> Value {
    json!({
        "action": action,
        "type": "text",
        "content": content,
    })
}

/// Build the battery in its fixed order. With `run.extended`, the extra
/// backend routes are appended after the frontend check.
pub fn notesmaker_checks(config: &HarnessConfig) -> Result<Vec<CheckSpec>, ConfigError> {
    let Services { backend, ai, frontend } = Services::from_config(config)?;
    let health = config.timeouts.health();
    let analyze = config.timeouts.analyze();

    let mut checks = vec![
        CheckSpec::get("AI Service Health", &ai, "/health")
            .timeout(health)
            .extract(Extractor::JsonVerbatim),
        CheckSpec::post(
            "AI Text Summarization",
            &ai,
            "/analyze",
            analyze_payload("summarize", SUMMARIZE_SAMPLE),
        )
        .timeout(analyze)
        .extract(Extractor::field_truncated("result", SUMMARY_LIMIT)),
        CheckSpec::post(
            "AI Text Rewriting",
            &ai,
            "/analyze",
            analyze_payload("rewrite", REWRITE_SAMPLE),
        )
        .timeout(analyze)
        .extract(Extractor::field("result")),
        CheckSpec::post(
            "AI Explain",
            &ai,
            "/analyze",
            analyze_payload("explain", EXPLAIN_SAMPLE),
        )
        .timeout(analyze)
        .extract(Extractor::field_truncated("result", EXPLANATION_LIMIT)),
        CheckSpec::get("Backend Service Health", &backend, "/health")
            .timeout(health)
            .extract(Extractor::JsonVerbatim),
        CheckSpec::get("Backend API - Get Tasks", &backend, "/api/tasks")
            .timeout(health)
            .extract(Extractor::count("tasks")),
        // Non-200 from the dev server is reported as a warning only.
        CheckSpec::get("Frontend Server", &frontend, "/")
            .timeout(health)
            .soft(),
    ];

    if config.run.extended {
        checks.extend([
            CheckSpec::get("Backend API - Get Notes", &backend, "/api/notes")
                .timeout(health)
                .extract(Extractor::count("notes")),
            CheckSpec::get("Backend API - Get Folders", &backend, "/api/folders")
                .timeout(health)
                .extract(Extractor::count("folders")),
            CheckSpec::get("Backend AI Bridge Health", &backend, "/api/ai/health")
                .timeout(health)
                .extract(Extractor::JsonVerbatim),
        ]);
    }

    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Severity;
    use reqwest::Method;
    use std::time::Duration;

    #[test]
    fn default_battery_has_fixed_order() {
        let checks = notesmaker_checks(&HarnessConfig::default()).unwrap();
        let plan: Vec<(Method, &str)> = checks.iter().map(|c| (c.method.clone(), c.url.as_str())).collect();

        assert_eq!(
            plan,
            vec![
                (Method::GET, "http://localhost:5001/health"),
                (Method::POST, "http://localhost:5001/analyze"),
                (Method::POST, "http://localhost:5001/analyze"),
                (Method::POST, "http://localhost:5001/analyze"),
                (Method::GET, "http://localhost:5000/health"),
                (Method::GET, "http://localhost:5000/api/tasks"),
                (Method::GET, "http://localhost:5174/"),
            ]
        );
    }

    #[test]
    fn analyze_payloads_carry_action() {
        let checks = notesmaker_checks(&HarnessConfig::default()).unwrap();
        let actions: Vec<&str> = checks[1..4]
            .iter()
            .map(|c| c.payload.as_ref().and_then(|p| p["action"].as_str()).unwrap())
            .collect();
        assert_eq!(actions, vec!["summarize", "rewrite", "explain"]);
        assert_eq!(checks[2].payload.as_ref().unwrap()["content"], REWRITE_SAMPLE);
        assert_eq!(checks[1].payload.as_ref().unwrap()["type"], "text");
    }

    #[test]
    fn timeouts_follow_config() {
        let mut config = HarnessConfig::default();
        config.timeouts.analyze_secs = 42;
        let checks = notesmaker_checks(&config).unwrap();

        assert_eq!(checks[0].timeout, Duration::from_secs(5));
        assert!(checks[1..4].iter().all(|c| c.timeout == Duration::from_secs(42)));
        assert_eq!(checks[6].timeout, Duration::from_secs(5));
    }

    #[test]
    fn only_frontend_is_soft() {
        let checks = notesmaker_checks(&HarnessConfig::default()).unwrap();
        let soft: Vec<&str> = checks
            .iter()
            .filter(|c| c.severity == Severity::Soft)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(soft, vec!["Frontend Server"]);
    }

    #[test]
    fn extended_battery_appends_backend_routes() {
        let mut config = HarnessConfig::default();
        config.run.extended = true;
        let checks = notesmaker_checks(&config).unwrap();

        assert_eq!(checks.len(), 10);
        assert_eq!(checks[6].name, "Frontend Server");
        assert_eq!(checks[7].url, "http://localhost:5000/api/notes");
        assert_eq!(checks[9].url, "http://localhost:5000/api/ai/health");
    }

    #[test]
    fn base_urls_are_trimmed_and_validated() {
        let mut config = HarnessConfig::default();
        config.services.backend_base_url = "http://backend.lan:8080/".to_string();
        let checks = notesmaker_checks(&config).unwrap();
        assert_eq!(checks[4].url, "http://backend.lan:8080/health");

        config.services.ai_base_url = "ai.lan".to_string();
        assert!(matches!(
            notesmaker_checks(&config),
            Err(ConfigError::InvalidBaseUrl { url, .. }) if url == "ai.lan"
        ));
    }
}
