//! Browser transport over `gloo-net`, plus the start-up config fetch.

use async_trait::async_trait;
use chaosdash_core::{ApiTransport, DashError, DashboardConfig, Method, RawResponse, Result};
use gloo_net::http::Request;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl ApiTransport for GlooTransport {
    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<RawResponse> {
        let builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Delete => Request::delete(url),
        };
        let request = match &body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| DashError::Network(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| DashError::Network(e.to_string()))?;
        let status = resp.status();
        let status_text = resp.status_text();
        let text = resp.text().await.map_err(|e| DashError::Network(e.to_string()))?;

        Ok(RawResponse {
            status,
            status_text,
            body: text,
        })
    }
}

/// Ask the hosting server where the experiment API lives. Falls back to the
/// default root when the page is served by something else.
pub async fn fetch_dashboard_config() -> DashboardConfig {
    async fn fetch() -> std::result::Result<DashboardConfig, String> {
        let resp = Request::get("/dashboard/config")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !resp.ok() {
            return Err(format!("{} {}", resp.status(), resp.status_text()));
        }

        let text = resp.text().await.map_err(|e| e.to_string())?;
        let config: DashboardConfig = serde_json::from_str(&text).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    match fetch().await {
        Ok(config) => {
            log::info!("experiment API at {}", config.api_base());
            config
        }
        Err(e) => {
            let config = DashboardConfig::default();
            log::warn!("no dashboard config ({}), using {}", e, config.api_root);
            config
        }
    }
}
