//! API error type mapping relay failures to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::relay::ProviderError;

/// Failures of the relay endpoint, each mapped to a status code and a fixed
/// client-facing message. Provider identity, credential state and raw
/// upstream payloads never appear in a response.
#[derive(Debug)]
pub enum ApiError {
    /// The endpoint only accepts POST.
    MethodNotAllowed,
    /// The request body lacks `messages` or `systemPrompt`.
    MissingInput,
    /// No provider API key is configured in this deployment.
    ApiKeyNotConfigured,
    /// The upstream provider answered with a non-success status.
    UpstreamFailure(u16),
    /// Transport failure or any other unexpected error.
    Internal,
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiKeyMissing => Self::ApiKeyNotConfigured,
            ProviderError::UpstreamStatus { status } => Self::UpstreamFailure(status),
            other => {
                tracing::error!("chat relay error: {other}");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            Self::MissingInput => (
                StatusCode::BAD_REQUEST,
                "Missing messages or systemPrompt",
            ),
            Self::ApiKeyNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key not configured",
            ),
            Self::UpstreamFailure(code) => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "Failed to get response from API",
            ),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
