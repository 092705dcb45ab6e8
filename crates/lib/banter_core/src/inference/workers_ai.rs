// @awa-component: INF-WorkersAiBackend
//
//! Cloudflare Workers AI backend.
//!
//! Calls `POST {base}/accounts/{account_id}/ai/run/{model}` and unwraps the
//! Cloudflare v4 response envelope.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{InferenceBackend, InferenceError, InferenceRequest, InferenceResponse};

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    result: Option<InferenceResponse>,
    #[serde(default)]
    errors: Vec<EnvelopeError>,
}

#[derive(Deserialize)]
struct EnvelopeError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Backend for the hosted Workers AI REST API.
pub struct WorkersAiBackend {
    client: Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl WorkersAiBackend {
    pub fn new(
        client: Client,
        base_url: &str,
        account_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            api_token: api_token.into(),
        }
    }

    /// Endpoint for a model. Model ids contain slashes (`@cf/meta/...`) which
    /// are part of the path.
    fn run_url(&self, model: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, model
        )
    }
}

/// Unwrap a Workers AI envelope into the generated text.
fn parse_envelope(body: &[u8]) -> Result<InferenceResponse, InferenceError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| InferenceError::Malformed(format!("Workers AI response parse error: {e}")))?;

    if !envelope.success {
        let detail = envelope
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{code}: {}", e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(InferenceError::Rejected(if detail.is_empty() {
            "success=false with no error detail".to_string()
        } else {
            detail
        }));
    }

    envelope
        .result
        .ok_or_else(|| InferenceError::Malformed("Workers AI response has no result".to_string()))
}

#[async_trait]
impl InferenceBackend for WorkersAiBackend {
    async fn run(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let url = self.run_url(model);
        debug!(%url, messages = request.messages.len(), "calling Workers AI");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        // Cloudflare reports failures inside the envelope even on 4xx, so
        // prefer its error detail when the body parses.
        match parse_envelope(&body) {
            Ok(out) if status.is_success() => Ok(out),
            Ok(_) => Err(InferenceError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
            Err(InferenceError::Malformed(_)) if !status.is_success() => {
                Err(InferenceError::Upstream {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        "workers-ai"
    }
}
