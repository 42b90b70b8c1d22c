//! Where the experiment API lives.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// Root of the experiment API when nothing else is configured.
pub const DEFAULT_API_ROOT: &str = "http://localhost:8080";

/// Versioned prefix appended to the API root.
pub const API_PREFIX: &str = "/api/v1";

/// Runtime configuration shared by the dashboard and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// e.g. `http://chaos-api.internal:8080`
    #[serde(default = "default_api_root")]
    pub api_root: String,
    /// Optional per-request timeout in seconds. Only honored by native transports.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            ..Default::default()
        }
    }

    /// Read a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: DashboardConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let root = self.api_root.trim();
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            return Err(DashError::Config(format!(
                "api_root must be an http(s) URL, got '{}'",
                self.api_root
            )));
        }
        Ok(())
    }

    /// `api_root` + `/api/v1`, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_root.trim().trim_end_matches('/'), API_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_normalizes_trailing_slash() {
        assert_eq!(
            DashboardConfig::new("http://chaos:8080/").api_base(),
            "http://chaos:8080/api/v1"
        );
        assert_eq!(
            DashboardConfig::default().api_base(),
            "http://localhost:8080/api/v1"
        );
    }

    #[test]
    fn yaml_defaults_missing_fields() {
        let config = DashboardConfig::from_yaml("timeout_secs: 5\n").unwrap();
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn rejects_non_http_root() {
        let err = DashboardConfig::from_yaml("api_root: ftp://nope\n").unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chaosdash.yaml");
        std::fs::write(&path, "api_root: https://chaos.example\n").unwrap();
        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.api_base(), "https://chaos.example/api/v1");
    }
}
