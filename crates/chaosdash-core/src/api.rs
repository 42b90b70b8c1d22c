//! Typed client for the experiment API.
//!
//! The client only knows paths and payloads. Moving bytes is delegated to an
//! [`ApiTransport`]: `gloo-net` in the browser, `reqwest` in the CLI, a
//! recording fake in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::{DashError, Result};
use crate::models::{Experiment, NewExperiment, NewTarget, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whatever came back over the wire, before status checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange. Implementations must map a rejected request (no
/// response at all) to [`DashError::Network`] and return every response,
/// whatever its status, as `Ok`.
#[async_trait(?Send)]
pub trait ApiTransport {
    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<RawResponse>;
}

pub struct ApiClient<T> {
    transport: T,
    base: String,
}

impl<T: ApiTransport> ApiClient<T> {
    pub fn new(transport: T, config: &DashboardConfig) -> Self {
        Self {
            transport,
            base: config.api_base(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Experiments ─────────────────────────────────────────────────────────

    pub async fn list_experiments(&self) -> Result<Vec<Experiment>> {
        self.fetch_list("/experiments").await
    }

    pub async fn get_experiment(&self, id: &str) -> Result<Experiment> {
        self.fetch_json(&format!("/experiments/{}", urlencoding::encode(id)))
            .await
    }

    /// Returns the created record when the server echoes one back.
    pub async fn create_experiment(&self, payload: &NewExperiment) -> Result<Option<Experiment>> {
        let body = serde_json::to_value(payload)?;
        let resp = self.request(Method::Post, "/experiments", Some(body)).await?;
        Ok(decode_created(&resp.body))
    }

    pub async fn execute_experiment(&self, id: &str) -> Result<()> {
        let path = format!("/experiments/{}/execute", urlencoding::encode(id));
        self.request(Method::Post, &path, None).await.map(|_| ())
    }

    pub async fn delete_experiment(&self, id: &str) -> Result<()> {
        let path = format!("/experiments/{}", urlencoding::encode(id));
        self.request(Method::Delete, &path, None).await.map(|_| ())
    }

    /// The API has no stop endpoint. Fails without touching the network.
    pub async fn stop_experiment(&self, id: &str) -> Result<()> {
        warn!(experiment = %id, "stop requested but the API exposes no stop endpoint");
        Err(DashError::Unsupported("stopping experiments"))
    }

    // ── Targets ─────────────────────────────────────────────────────────────

    pub async fn list_targets(&self) -> Result<Vec<Target>> {
        self.fetch_list("/targets").await
    }

    /// There is no single-target endpoint: fetch the collection and pick by id.
    pub async fn get_target(&self, id: &str) -> Result<Target> {
        self.list_targets()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DashError::NotFound(format!("target {}", id)))
    }

    pub async fn create_target(&self, payload: &NewTarget) -> Result<Option<Target>> {
        let body = serde_json::to_value(payload)?;
        let resp = self.request(Method::Post, "/targets", Some(body)).await?;
        Ok(decode_created(&resp.body))
    }

    pub async fn delete_target(&self, id: &str) -> Result<()> {
        let path = format!("/targets/{}", urlencoding::encode(id));
        self.request(Method::Delete, &path, None).await.map(|_| ())
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    async fn fetch_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let resp = self.request(Method::Get, path, None).await?;
        serde_json::from_str(&resp.body).map_err(DashError::from)
    }

    /// An empty table is serialized as `null` rather than `[]`.
    async fn fetch_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>> {
        let items: Option<Vec<R>> = self.fetch_json(path).await?;
        Ok(items.unwrap_or_default())
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<RawResponse> {
        let url = format!("{}{}", self.base, path);
        debug!(%method, %url, "api request");
        let resp = self.transport.send(method, &url, body).await.map_err(|e| {
            warn!(%method, %url, error = %e, "request failed");
            e
        })?;
        if !resp.is_success() {
            warn!(%method, %url, status = resp.status, "api returned an error status");
            return Err(DashError::http(resp.status, resp.status_text));
        }
        Ok(resp)
    }
}

/// Success is decided by the status code alone. A body that does not decode
/// must not turn a completed create into a failure.
fn decode_created<R: DeserializeOwned>(body: &str) -> Option<R> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "created record could not be decoded");
            None
        }
    }
}
