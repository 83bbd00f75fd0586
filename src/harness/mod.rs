//! Service-health verification harness
//!
//! A run takes an ordered list of [`CheckSpec`] values, sends each one once
//! through an [`HttpClient`], and records exactly one [`CheckResult`] per
//! check in a [`HarnessReport`]. Transport errors, unexpected statuses and
//! unparseable bodies are all captured as results; only a malformed check
//! list aborts a run, and it does so before the first request.
//!
//! ## Types
//!
//! - [`CheckSpec`]: one declared probe (method, url, payload, timeout, expectation)
//! - [`Extractor`]: turns a successful body into a report snippet
//! - [`Runner`]: executes checks sequentially or per-service concurrently
//! - [`HarnessReport`]: ordered results plus tallies
//! - [`summarize`]: text rendering with the service footer

pub mod check;
pub mod client;
pub mod extract;
pub mod report;
pub mod result;
pub mod runner;

pub use check::{CheckSpec, ServiceEndpoint, Severity, DEFAULT_TIMEOUT};
pub use client::{HttpClient, ProbeResponse, ReqwestClient};
pub use extract::{truncate, Extractor};
pub use report::{print_summary, summarize, to_json};
pub use result::{CheckResult, CheckStatus, HarnessReport, DETAIL_LIMIT};
pub use runner::{validate, Runner};
