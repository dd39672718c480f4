//! API error types.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sintquest_core::error::DomainError;
use sintquest_puzzle::domain::answer_book::AnswerBookError;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The answer table could not be loaded.
    #[error(transparent)]
    AnswerBook(#[from] AnswerBookError),

    /// The key-value store or cookie settings were rejected.
    #[error("startup error: {0}")]
    Domain(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "request body rejected");
        Self(DomainError::Validation("INVALID INPUT".into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self.0 {
            DomainError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            DomainError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message)
            }
            DomainError::AccessDenied(message) => (StatusCode::FORBIDDEN, "access_denied", message),
            err @ DomainError::Infrastructure(_) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "infrastructure_error",
                    err.to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
