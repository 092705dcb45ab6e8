// @awa-component: API-ChatHandler
//
//! Chat request handler.

use axum::body::Bytes;
use axum::extract::State;
use banter_core::chat::ChatRequest;
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult, INVALID_BODY_MESSAGE};

/// `POST /chat` — relay a message and return the generated text as plain text.
///
/// The body is parsed as JSON whatever `Content-Type` the client sent.
pub async fn chat_handler(State(state): State<AppState>, body: Bytes) -> AppResult<String> {
    let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("unparseable chat body: {e}");
        AppError::Validation(INVALID_BODY_MESSAGE.into())
    })?;

    let reply = state
        .relay
        .reply(&request)
        .await
        .inspect_err(|e| debug!("chat turn not answered: {e}"))?;
    Ok(reply)
}
