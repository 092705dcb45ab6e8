//! # banter_api
//!
//! HTTP API library for Banter: serves the chat page and relays chat
//! messages to the inference backend.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use banter_core::relay::ChatRelay;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{chat, page};

/// Route for the chat page.
pub const GET_PAGE: &str = "/";
/// Route for chat submissions.
pub const POST_CHAT: &str = "/chat";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay holding the injected inference backend.
    pub relay: Arc<ChatRelay>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors: CorsLayer = state.config.cors_origins.layer();

    Router::new()
        .route(GET_PAGE, get(page::page_handler))
        .route(POST_CHAT, post(chat::chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
