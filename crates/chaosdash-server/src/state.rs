//! Shared application state for the Axum server.

use std::sync::Arc;

use chaosdash_core::config::DEFAULT_API_ROOT;
use chaosdash_core::DashboardConfig;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(dashboard: DashboardConfig) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Experiment API root handed to the browser.
    pub api_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn dashboard(&self) -> DashboardConfig {
        DashboardConfig::new(self.api_root.trim().trim_end_matches('/'))
    }
}
