//! HTTP route handlers for the advisory site and its chat relay.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use crate::chat::message::Message;

use super::error::ApiError;
use super::state::AppState;

/// Create the API router with all routes.
///
/// The relay endpoint accepts POST only; every other method is answered with
/// the method-not-allowed error body. Site assets are served from `static/`.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(relay_chat).fallback(method_not_allowed))
        .fallback_service(ServeDir::new("static"))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "cadastre-advisor",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Answer non-POST requests to the relay endpoint.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Chat relay request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Full conversation log, oldest first.
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
    /// Fixed system instruction sent with every call.
    #[serde(rename = "systemPrompt", default)]
    pub system_prompt: Option<String>,
}

/// Chat relay response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply, never empty.
    pub reply: String,
}

/// Handle chat relay requests.
///
/// Validates the two required fields before any upstream call, then forwards
/// the log and system instruction through the relay service.
async fn relay_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let messages = request
        .messages
        .filter(|messages| !messages.is_empty())
        .ok_or(ApiError::MissingInput)?;
    let system_prompt = request
        .system_prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .ok_or(ApiError::MissingInput)?;

    let reply = state.relay.complete(&messages, &system_prompt).await?;

    Ok(Json(ChatResponse { reply }))
}
