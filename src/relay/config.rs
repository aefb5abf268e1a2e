//! Configuration for the relay module.

use std::time::Duration;

use super::providers::ChatProvider;

/// Default bound on upstream output size, in tokens.
const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Default overall request timeout for upstream calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout for upstream calls.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable selecting the upstream provider.
const PROVIDER_ENV: &str = "CADASTRE_PROVIDER";
/// Environment variable overriding the model name.
const MODEL_ENV: &str = "CADASTRE_MODEL";
/// Environment variable overriding the upstream API root (egress gateways).
const UPSTREAM_URL_ENV: &str = "CADASTRE_UPSTREAM_URL";

/// Configuration for the relay service.
///
/// The provider credential is injected here once at startup and read-only
/// thereafter; nothing else in the relay touches the process environment.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Upstream provider for this deployment.
    pub provider: ChatProvider,
    /// Provider API key; requests fail with a configuration error while unset.
    pub api_key: Option<String>,
    /// Model name sent upstream.
    pub model: String,
    /// Bound on upstream output size, in tokens.
    pub max_tokens: u32,
    /// Overall request timeout for upstream calls.
    pub request_timeout: Duration,
    /// Connection timeout for upstream calls.
    pub connect_timeout: Duration,
    /// Replaces the provider's default API root when set.
    pub upstream_base_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let provider = ChatProvider::default();
        Self {
            provider,
            api_key: None,
            model: provider.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            upstream_base_url: None,
        }
    }
}

impl RelayConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the config from the process environment.
    ///
    /// Reads the provider selection, its API key, and the optional model and
    /// upstream overrides. Unset or blank variables fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let provider: ChatProvider = std::env::var(PROVIDER_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let api_key = std::env::var(provider.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        let upstream_base_url = std::env::var(UPSTREAM_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            provider,
            api_key,
            model,
            upstream_base_url,
            ..Self::default()
        }
    }

    /// Select the upstream provider and reset the model to its default.
    #[must_use]
    pub fn with_provider(mut self, provider: ChatProvider) -> Self {
        self.provider = provider;
        self.model = provider.default_model().to_string();
        self
    }

    /// Set the provider API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the output token bound.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Replace the provider's default API root.
    #[must_use]
    pub fn with_upstream_base_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_base_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.provider, ChatProvider::Anthropic);
        assert_eq!(config.model, ChatProvider::Anthropic.default_model());
        assert_eq!(config.max_tokens, 1024);
        assert!(config.api_key.is_none());
        assert!(config.upstream_base_url.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = RelayConfig::new()
            .with_provider(ChatProvider::Gemini)
            .with_api_key("test-key")
            .with_max_tokens(256);

        assert_eq!(config.provider, ChatProvider::Gemini);
        assert_eq!(config.model, ChatProvider::Gemini.default_model());
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.max_tokens, 256);
    }

    #[test]
    fn test_with_provider_resets_model() {
        let config = RelayConfig::new()
            .with_model("custom-model")
            .with_provider(ChatProvider::Gemini);
        assert_eq!(config.model, ChatProvider::Gemini.default_model());

        let config = RelayConfig::new()
            .with_provider(ChatProvider::Gemini)
            .with_model("custom-model");
        assert_eq!(config.model, "custom-model");
    }
}
