//! API server configuration.

use std::str::FromStr;

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Errors from parsing API configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error("CORS origin list is empty")]
    EmptyOrigins,
}

/// Origins allowed to call the API from a browser.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    #[default]
    Any,
    /// Only the listed origins, e.g. `https://chat.example.com`.
    List(Vec<HeaderValue>),
}

impl CorsOrigins {
    /// Build the CORS layer for this policy. Methods and headers are
    /// unrestricted; only the origin is policed.
    pub fn layer(&self) -> CorsLayer {
        let origin = match self {
            CorsOrigins::Any => AllowOrigin::from(Any),
            CorsOrigins::List(origins) => AllowOrigin::list(origins.iter().cloned()),
        };
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

impl FromStr for CorsOrigins {
    type Err = ConfigError;

    /// Parses `*` or a comma-separated origin list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" {
            return Ok(CorsOrigins::Any);
        }

        let origins = s
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                if o == "*" || !(o.starts_with("http://") || o.starts_with("https://")) {
                    return Err(ConfigError::InvalidOrigin(o.to_string()));
                }
                HeaderValue::from_str(o.trim_end_matches('/'))
                    .map_err(|_| ConfigError::InvalidOrigin(o.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if origins.is_empty() {
            return Err(ConfigError::EmptyOrigins);
        }
        Ok(CorsOrigins::List(origins))
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8787").
    pub bind_addr: String,
    /// Cross-origin policy applied to all routes.
    pub cors_origins: CorsOrigins,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            cors_origins: CorsOrigins::Any,
        }
    }
}
