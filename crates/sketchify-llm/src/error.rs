//! Error types for sketchify-llm

use thiserror::Error;

/// Provider error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// Fault reported by the model provider, message kept verbatim
    #[error("{0}")]
    Upstream(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),
}

impl Error {
    /// Get error code for logs
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "not_configured",
            Self::Upstream(_) => "upstream_error",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Network(_) => "network_error",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // without_url: request URLs never end up in client-facing messages
        Self::Network(err.without_url().to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
