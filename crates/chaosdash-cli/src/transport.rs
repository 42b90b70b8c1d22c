//! `reqwest` implementation of the dashboard transport.

use std::time::Duration;

use async_trait::async_trait;
use chaosdash_core::{ApiTransport, DashError, DashboardConfig, Method, RawResponse, Result};
use serde_json::Value;
use tracing::debug;

pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Requests never time out unless `timeout_secs` is configured.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("chaosdash/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DashError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait(?Send)]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<RawResponse> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DashError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DashError::Network(e.to_string()))?;
        debug!(%method, url, status = status.as_u16(), bytes = text.len(), "response");

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: text,
        })
    }
}
