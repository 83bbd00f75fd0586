//! HTTP transport used by the runner
//!
//! The runner only needs "send this check, give me status and body". Keeping
//! that behind [`HttpClient`] lets tests script responses and transport
//! failures without a network.

use async_trait::async_trait;
use tracing::debug;

use super::check::CheckSpec;
use crate::error::TransportError;

/// What came back from a probed service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ProbeResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send `check` once, honouring its method, url, payload and timeout.
    async fn send(&self, check: &CheckSpec) -> Result<ProbeResponse, TransportError>;
}

/// [`HttpClient`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, check: &CheckSpec) -> Result<ProbeResponse, TransportError> {
        debug!("{} {} (timeout {:?})", check.method, check.url, check.timeout);

        let mut request = self
            .client
            .request(check.method.clone(), &check.url)
            .timeout(check.timeout);
        if let Some(payload) = &check.payload {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, check.timeout))?;
        let status = response.status().as_u16();
        debug!("{} {} returned status {}", check.method, check.url, status);

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, check.timeout))?;

        Ok(ProbeResponse::new(status, body.to_vec()))
    }
}
