//! Conversation relay to upstream chat-completion providers.
//!
//! This module accepts a conversation log plus a system instruction,
//! translates them into the wire format of exactly one configured upstream
//! provider, and returns a single best-effort reply string. Upstream
//! credentials and raw upstream payloads never leave this boundary.

pub mod config;
pub mod error;
pub mod providers;

pub use config::RelayConfig;
pub use error::ProviderError;
pub use providers::ChatProvider;

use crate::chat::message::Message;

/// Reply substituted when the upstream response yields no usable text, so
/// callers never receive an empty reply.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process that. Please try again.";

/// Relay service holding the provider configuration and HTTP client.
///
/// Stateless per request: concurrent invocations share only the read-only
/// configuration and the connection pool.
pub struct RelayService {
    config: RelayConfig,
    client: reqwest::Client,
}

impl RelayService {
    /// Create a relay service with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: RelayConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::HttpClient(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a relay service with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, ProviderError> {
        Self::new(RelayConfig::default())
    }

    /// Relay one conversation turn through the configured provider.
    ///
    /// Checks the credential precondition before any upstream call, then
    /// dispatches to the provider translation. An upstream response without
    /// usable text becomes [`FALLBACK_REPLY`]; the returned string is never
    /// empty. No retry is attempted.
    ///
    /// # Errors
    /// Returns an error when the API key is missing, the upstream call
    /// fails, or the upstream answers with a non-success status.
    pub async fn complete(
        &self,
        messages: &[Message],
        system_prompt: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::ApiKeyMissing)?;

        let extracted = match self.config.provider {
            ChatProvider::Anthropic => {
                providers::anthropic::complete(
                    &self.client,
                    messages,
                    system_prompt,
                    api_key,
                    &self.config,
                )
                .await?
            }
            ChatProvider::Gemini => {
                providers::gemini::complete(
                    &self.client,
                    messages,
                    system_prompt,
                    api_key,
                    &self.config,
                )
                .await?
            }
        };

        Ok(extracted
            .filter(|reply| !reply.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_creation() {
        let service = RelayService::with_defaults();
        assert!(service.is_ok());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_upstream_call() {
        // Unroutable upstream: reaching it would fail with an HTTP error,
        // so getting ApiKeyMissing proves no call was attempted.
        let config = RelayConfig::new().with_upstream_base_url("http://127.0.0.1:1");
        let Ok(service) = RelayService::new(config) else {
            return;
        };

        let messages = vec![Message::user("hello")];
        let result = service.complete(&messages, "prompt").await;
        assert!(matches!(result, Err(ProviderError::ApiKeyMissing)));
    }
}
