pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod harness;

pub use error::{ConfigError, ExtractionError, TransportError};
pub use harness::{CheckResult, CheckSpec, CheckStatus, HarnessReport, Runner};
