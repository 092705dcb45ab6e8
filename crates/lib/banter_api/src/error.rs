//! Application error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use banter_core::relay::RelayError;
use thiserror::Error;

/// Body returned when the inference call fails.
pub const INFERENCE_FAILED_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request.";

/// Body returned for a blank chat message.
pub const EMPTY_MESSAGE_MESSAGE: &str = "Message must not be empty.";

/// Body returned when the chat body is not a JSON object with a string `message`.
pub const INVALID_BODY_MESSAGE: &str = "Request body must be JSON like {\"message\": \"...\"}.";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Responses are plain text; internal detail is logged, never returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Inference failed")]
    InferenceFailed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            AppError::InferenceFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INFERENCE_FAILED_MESSAGE.to_string(),
            ),
        };
        (status, body).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::EmptyMessage => AppError::Validation(EMPTY_MESSAGE_MESSAGE.into()),
            RelayError::Inference(_) => AppError::InferenceFailed,
        }
    }
}
