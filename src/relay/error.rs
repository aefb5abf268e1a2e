//! Error types for the relay module.

use thiserror::Error;

/// Errors that can occur while relaying a conversation upstream.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// No provider API key was configured for this deployment.
    #[error("API key not configured")]
    ApiKeyMissing,

    /// The upstream provider answered with a non-success status.
    #[error("upstream returned status {status}")]
    UpstreamStatus {
        /// Status code reported by the upstream provider.
        status: u16,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
