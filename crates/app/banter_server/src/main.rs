//! Banter chat relay server binary.
//!
//! Serves the chat page on `/` and relays `POST /chat` to the configured
//! inference provider.

use std::sync::Arc;

use banter_api::config::{ApiConfig, CorsOrigins, DEFAULT_BIND_ADDR};
use banter_core::inference::config::{
    DEFAULT_OLLAMA_BASE_URL, DEFAULT_PROVIDER, DEFAULT_WORKERS_AI_BASE_URL, InferenceConfig,
};
use banter_core::inference::provider;
use banter_core::persona::PersonaChoice;
use banter_core::relay::ChatRelay;
use clap::Parser;
use tracing::info;

/// CLI arguments for the chat relay server.
#[derive(Parser, Debug)]
#[command(name = "banter_server", about = "Banter chat relay server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind: String,

    /// Inference provider: `workers-ai` or `ollama`.
    #[arg(long, env = "INFERENCE_PROVIDER", default_value = DEFAULT_PROVIDER)]
    provider: String,

    /// Model identifier. Defaults to the provider's default model.
    #[arg(long, env = "INFERENCE_MODEL")]
    model: Option<String>,

    /// Persona variant: `none`, `joshua` or `custom`.
    #[arg(long, env = "CHAT_PERSONA", default_value = "none")]
    persona: PersonaChoice,

    /// System prompt for the `custom` persona.
    #[arg(long, env = "PERSONA_SYSTEM_PROMPT")]
    persona_system_prompt: Option<String>,

    /// Canned assistant greeting for the `custom` persona.
    #[arg(long, env = "PERSONA_GREETING")]
    persona_greeting: Option<String>,

    /// Allowed CORS origins: `*` or a comma-separated list.
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", default_value = "*")]
    cors_origins: CorsOrigins,

    /// Cloudflare account id (workers-ai).
    #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID")]
    cloudflare_account_id: Option<String>,

    /// Cloudflare API token (workers-ai).
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    cloudflare_api_token: Option<String>,

    /// Workers AI REST base URL.
    #[arg(long, env = "WORKERS_AI_BASE_URL", default_value = DEFAULT_WORKERS_AI_BASE_URL)]
    workers_ai_base_url: String,

    /// Ollama API base URL.
    #[arg(long, env = "OLLAMA_BASE_URL", default_value = DEFAULT_OLLAMA_BASE_URL)]
    ollama_base_url: String,
}

impl Args {
    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model: self
                .model
                .clone()
                .unwrap_or_else(|| InferenceConfig::default_model(&self.provider).to_string()),
            provider: self.provider.clone(),
            workers_ai_base_url: self.workers_ai_base_url.clone(),
            cloudflare_account_id: self.cloudflare_account_id.clone(),
            cloudflare_api_token: self.cloudflare_api_token.clone(),
            ollama_base_url: self.ollama_base_url.clone(),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,banter_api=debug,banter_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let inference = args.inference_config();
    let persona = args.persona.resolve(
        args.persona_system_prompt.clone(),
        args.persona_greeting.clone(),
    )?;

    info!(
        provider = %inference.provider,
        model = %inference.model,
        persona = ?args.persona,
        version = env!("CARGO_PKG_VERSION"),
        "starting banter_server"
    );

    let backend = provider::build_backend(reqwest::Client::new(), &inference)?;
    let relay = ChatRelay::new(backend, inference.model, persona);

    let config = ApiConfig {
        bind_addr: args.bind,
        cors_origins: args.cors_origins,
    };
    let state = banter_api::AppState {
        relay: Arc::new(relay),
        config: config.clone(),
    };

    let app = banter_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, cors = ?config.cors_origins, "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
