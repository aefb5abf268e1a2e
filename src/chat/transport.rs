//! Transport from the conversation state manager to the relay endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::message::Message;

/// Connection timeout for the relay HTTP client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Overall request timeout for the relay HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors surfaced by a relay transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("relay returned status {0}")]
    Status(u16),
}

/// A channel able to carry one conversation turn to the relay and back.
///
/// The session issues exactly one `send` per submission, carrying the entire
/// updated log plus the fixed system instruction, and never retries.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Send the full log and system instruction; return the assistant reply.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success relay status.
    async fn send(&self, messages: &[Message], system_prompt: &str)
        -> Result<String, TransportError>;
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    messages: &'a [Message],
    #[serde(rename = "systemPrompt")]
    system_prompt: &'a str,
}

#[derive(Deserialize)]
struct RelayResponse {
    reply: String,
}

/// HTTP transport posting to the relay's `/api/chat` endpoint.
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelay {
    /// Create a transport for the given relay endpoint URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn send(
        &self,
        messages: &[Message],
        system_prompt: &str,
    ) -> Result<String, TransportError> {
        let request = RelayRequest {
            messages,
            system_prompt,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body: RelayResponse = response.json().await?;
        Ok(body.reply)
    }
}
