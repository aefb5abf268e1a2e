//! Anthropic messages API client.
//!
//! Builds a single request carrying the system instruction as a dedicated
//! field and the conversation log mapped 1:1 to role/content pairs, with a
//! bounded output size. The reply is the first content block's text.

use serde::{Deserialize, Serialize};

use crate::chat::message::Message;
use crate::relay::config::RelayConfig;
use crate::relay::error::ProviderError;

/// Anthropic API root.
const ANTHROPIC_API_ROOT: &str = "https://api.anthropic.com";
/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model for this provider.
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Relay one conversation turn through the Anthropic messages API.
///
/// Returns the extracted reply text, or `None` when the response carried no
/// usable text (the service substitutes the fallback reply in that case).
///
/// # Errors
/// Returns an error if the request fails or the upstream answers with a
/// non-success status. The upstream error body is logged server-side and
/// never propagated.
pub async fn complete(
    client: &reqwest::Client,
    messages: &[Message],
    system_prompt: &str,
    api_key: &str,
    config: &RelayConfig,
) -> Result<Option<String>, ProviderError> {
    let root = config
        .upstream_base_url
        .as_deref()
        .unwrap_or(ANTHROPIC_API_ROOT);
    let url = format!("{root}/v1/messages");

    let request = MessagesRequest {
        model: &config.model,
        max_tokens: config.max_tokens,
        system: system_prompt,
        messages,
    };

    let response = client
        .post(&url)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), "Anthropic API error: {body}");
        return Err(ProviderError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    let body: MessagesResponse = response.json().await?;
    Ok(extract_reply(body))
}

/// Pull the first content block's text out of the response.
fn extract_reply(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
}
