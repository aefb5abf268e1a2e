//! Google Gemini generateContent API client.
//!
//! Remaps every message onto the API's two turn roles (assistant becomes
//! `model`, everything else `user`), wraps each message as a single-part
//! turn, and sends the system instruction through the dedicated
//! `systemInstruction` field. The reply is the first candidate's first part.

use serde::{Deserialize, Serialize};

use crate::chat::message::{Message, Role};
use crate::relay::config::RelayConfig;
use crate::relay::error::ProviderError;

/// Gemini API root.
const GEMINI_API_ROOT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for this provider.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Turn<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction<'a>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Relay one conversation turn through the Gemini generateContent API.
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
        .unwrap_or(GEMINI_API_ROOT);
    let url = format!("{root}/models/{}:generateContent", config.model);

    let request = build_request(messages, system_prompt, config);

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), "Gemini API error: {body}");
        return Err(ProviderError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    let body: GenerateResponse = response.json().await?;
    Ok(extract_reply(body))
}

/// Map a log role onto one of the API's two turn roles.
const fn upstream_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::User => "user",
    }
}

/// Translate the log and system instruction into the request wire format.
fn build_request<'a>(
    messages: &'a [Message],
    system_prompt: &'a str,
    config: &RelayConfig,
) -> GenerateRequest<'a> {
    let contents = messages
        .iter()
        .map(|message| Turn {
            role: upstream_role(message.role),
            parts: [Part {
                text: &message.content,
            }],
        })
        .collect();

    GenerateRequest {
        contents,
        system_instruction: SystemInstruction {
            parts: [Part {
                text: system_prompt,
            }],
        },
        generation_config: GenerationConfig {
            max_output_tokens: config.max_tokens,
        },
    }
}

/// Pull the first candidate's first part text out of the response.
fn extract_reply(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
}
