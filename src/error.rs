// Harness Error Types
use std::time::Duration;
use thiserror::Error;

/// Malformed harness input. The only error that escapes a run, and it is
/// raised before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no checks configured")]
    EmptyCheckList,

    #[error("check '{check}' has invalid url '{url}': {reason}")]
    InvalidUrl {
        check: String,
        url: String,
        reason: String,
    },

    #[error("check '{check}' has a zero timeout")]
    InvalidTimeout { check: String },

    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// The request never produced a response
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Classify a reqwest failure. `timeout` is the budget the request ran with.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connect(error_chain(&err))
        } else {
            TransportError::Request(error_chain(&err))
        }
    }
}

// reqwest's top-level message hides the interesting part ("connection refused")
// in its source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// A response arrived but its body did not have the expected shape
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{0}' is not a string")]
    NotAString(String),

    #[error("expected a JSON array")]
    NotAnArray,

    #[error("{0}")]
    Custom(String),
}
