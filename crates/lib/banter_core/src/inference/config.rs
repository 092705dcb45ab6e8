//! Inference backend configuration.

/// Model used when none is configured for the Workers AI provider.
pub const DEFAULT_WORKERS_AI_MODEL: &str = "@cf/meta/llama-2-7b-chat-int8";
/// Model used when none is configured for the Ollama provider.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";
pub const DEFAULT_WORKERS_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_PROVIDER: &str = "workers-ai";

/// Resolved settings for which inference backend to call.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Provider name: `"workers-ai"` or `"ollama"`.
    pub provider: String,
    /// Model identifier passed to every call.
    pub model: String,
    /// Workers AI REST base URL (without the account segment).
    pub workers_ai_base_url: String,
    /// Cloudflare account id (required for `"workers-ai"`).
    pub cloudflare_account_id: Option<String>,
    /// Cloudflare API token (required for `"workers-ai"`).
    pub cloudflare_api_token: Option<String>,
    /// Ollama API base URL.
    pub ollama_base_url: String,
}

impl InferenceConfig {
    /// Default model for a provider name.
    pub fn default_model(provider: &str) -> &'static str {
        match provider {
            "ollama" => DEFAULT_OLLAMA_MODEL,
            _ => DEFAULT_WORKERS_AI_MODEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_models_per_provider() {
        assert_eq!(
            InferenceConfig::default_model("workers-ai"),
            "@cf/meta/llama-2-7b-chat-int8"
        );
        assert_eq!(InferenceConfig::default_model("ollama"), "llama2");
        assert_eq!(
            InferenceConfig::default_model("unknown"),
            DEFAULT_WORKERS_AI_MODEL
        );
    }
}
