//! Inference module — the external capability that turns a conversation into
//! generated text.
//!
//! The relay only sees the [`InferenceBackend`] trait. Concrete backends talk
//! to a hosted service over HTTP and are chosen by [`provider::build_backend`].
//!
//! # Providers
//!
//! - `"workers-ai"` — Cloudflare Workers AI REST API (`@cf/meta/llama-2-7b-chat-int8`)
//! - `"ollama"` — Ollama local chat API, for offline development

pub mod config;
pub mod ollama;
pub mod provider;
pub mod workers_ai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::Conversation;

/// Errors raised by an inference backend.
///
/// The relay treats every variant as "inference invocation failed"; the
/// detail is for logs only.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Inference service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Inference service rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed inference response: {0}")]
    Malformed(String),

    #[error("Inference config error: {0}")]
    Config(String),
}

/// Input of a single inference call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceRequest {
    pub messages: Conversation,
    pub stream: bool,
}

impl InferenceRequest {
    /// Non-streaming request for `messages`.
    pub fn new(messages: Conversation) -> Self {
        Self {
            messages,
            stream: false,
        }
    }
}

/// Output of a single inference call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InferenceResponse {
    pub response: String,
}

/// A hosted chat-completion capability.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Run `model` over the request's conversation and return the generated text.
    async fn run(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError>;

    /// Backend identifier for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatMessage;

    #[test]
    fn request_is_non_streaming() {
        let req = InferenceRequest::new(Conversation::from(vec![ChatMessage::user("hi")]));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }
}
