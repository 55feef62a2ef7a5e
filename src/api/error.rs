//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::diagnosis::ResolveError;
use crate::inference::InferenceError;

/// Structured error response body: `{message, details?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("No credential provided")]
    NoCredential,
    #[error("Credential is not valid")]
    InvalidCredential,
    #[error("Credential expired")]
    CredentialExpired,
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
        details: Option<serde_json::Value>,
    },
    #[error("Persistence failed: {0}")]
    Persistence(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap an inference failure that must be surfaced to the caller,
    /// propagating the upstream status when one exists.
    pub fn upstream(message: &str, err: &InferenceError) -> Self {
        ApiError::Upstream {
            status: err.status(),
            message: message.to_string(),
            details: Some(serde_json::Value::String(
                err.payload().map(str::to_string).unwrap_or_else(|| err.to_string()),
            )),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail, None),
            ApiError::NoCredential => (
                StatusCode::UNAUTHORIZED,
                "No credential provided.".to_string(),
                None,
            ),
            ApiError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "Credential is not valid.".to_string(),
                None,
            ),
            ApiError::CredentialExpired => (
                StatusCode::UNAUTHORIZED,
                "Credential expired, log in again.".to_string(),
                None,
            ),
            ApiError::Upstream { status, message, details } => (
                status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                message,
                details,
            ),
            ApiError::Persistence(message) => {
                tracing::error!(%message, "Persistence error");
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { message, details })).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Validation(message) => ApiError::BadRequest(message),
            ResolveError::Upstream { status, details } => ApiError::Upstream {
                status,
                message: "Failed to get diagnosis from external API.".to_string(),
                details: Some(serde_json::Value::String(details)),
            },
        }
    }
}
