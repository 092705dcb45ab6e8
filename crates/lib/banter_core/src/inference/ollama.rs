// @awa-component: INF-OllamaBackend
//
//! Ollama chat backend.
//!
//! Calls the Ollama API (`/api/chat`) with streaming disabled.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::Conversation;

use super::{InferenceBackend, InferenceError, InferenceRequest, InferenceResponse};

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a Conversation,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

/// Backend for a local Ollama server.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    async fn run(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(%url, model, "calling Ollama");

        let resp = self
            .client
            .post(&url)
            .json(&OllamaRequest {
                model,
                messages: &request.messages,
                stream: request.stream,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::Malformed(format!("Ollama response parse error: {e}")))?;

        let message = data
            .message
            .ok_or_else(|| InferenceError::Malformed("Ollama response has no message".to_string()))?;

        Ok(InferenceResponse {
            response: message.content,
        })
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
