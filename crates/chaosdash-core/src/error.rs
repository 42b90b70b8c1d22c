//! Error types for chaosdash-core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashError {
    /// The request never produced a response (connection refused, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),

    /// The API answered outside the 2xx range.
    #[error("{status} {status_text}")]
    Http { status: u16, status_text: String },

    /// A required local field is missing or malformed. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The operation has no backing endpoint.
    #[error("{0} is not supported by the API yet")]
    Unsupported(&'static str),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("config error: {0}")]
    Config(String),
}

impl DashError {
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        DashError::Http {
            status,
            status_text: status_text.into(),
        }
    }

    /// True when the error was raised locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            DashError::Validation(_) | DashError::Unsupported(_) | DashError::Config(_)
        )
    }
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        DashError::Decode(e.to_string())
    }
}

impl From<serde_yaml::Error> for DashError {
    fn from(e: serde_yaml::Error) -> Self {
        DashError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
