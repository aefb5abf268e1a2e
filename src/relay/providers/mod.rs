//! Upstream chat-completion providers.
//!
//! Exactly one provider is selected per deployment; the variants are
//! interchangeable behind the same relay contract and are never composed.

pub mod anthropic;
pub mod gemini;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// Available upstream providers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    /// Anthropic messages API (default).
    #[default]
    Anthropic,
    /// Google Gemini generateContent API.
    Gemini,
}

impl ChatProvider {
    /// Display name of the provider.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    #[must_use]
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Default model for this provider.
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => anthropic::DEFAULT_MODEL,
            Self::Gemini => gemini::DEFAULT_MODEL,
        }
    }
}

impl FromStr for ChatProvider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "gemini" | "google" => Ok(Self::Gemini),
            other => Err(ProviderError::Config(format!("unknown provider: {other}"))),
        }
    }
}
