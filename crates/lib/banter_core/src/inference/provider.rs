// @awa-component: INF-ProviderDispatch
//
//! Provider dispatch — builds the backend named by the configuration.

use std::sync::Arc;

use reqwest::Client;

use super::config::InferenceConfig;
use super::ollama::OllamaBackend;
use super::workers_ai::WorkersAiBackend;
use super::{InferenceBackend, InferenceError};

/// Build the backend for `config.provider`.
///
/// - `"workers-ai"` → Cloudflare Workers AI (needs account id and token)
/// - `"ollama"` → Ollama local API
pub fn build_backend(
    client: Client,
    config: &InferenceConfig,
) -> Result<Arc<dyn InferenceBackend>, InferenceError> {
    match config.provider.as_str() {
        "workers-ai" => {
            let account_id = config.cloudflare_account_id.clone().ok_or_else(|| {
                InferenceError::Config(
                    "CLOUDFLARE_ACCOUNT_ID is required for workers-ai provider".to_string(),
                )
            })?;
            let api_token = config.cloudflare_api_token.clone().ok_or_else(|| {
                InferenceError::Config(
                    "CLOUDFLARE_API_TOKEN is required for workers-ai provider".to_string(),
                )
            })?;
            Ok(Arc::new(WorkersAiBackend::new(
                client,
                &config.workers_ai_base_url,
                account_id,
                api_token,
            )))
        }
        "ollama" => Ok(Arc::new(OllamaBackend::new(client, &config.ollama_base_url))),
        other => Err(InferenceError::Config(format!(
            "Unsupported inference provider: {other}"
        ))),
    }
}
