use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::repair::RepairError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Error codes follow the callable-function taxonomy the client expects:
/// INVALID_ARGUMENT for caller-input errors raised before any external call,
/// FAILED_PRECONDITION for state the caller must establish first, INTERNAL
/// for upstream/repair/parse failures. Upstream error bodies are logged in
/// full but never echoed back to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Unauthenticated")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Model response repair failed: {0}")]
    Repair(#[from] RepairError),

    /// The model completed but its output violated the requested contract
    /// (invalid JSON after repair, or an unrecognized literal).
    #[error("Model output contract violation: {0}")]
    ModelContract(String),

    #[error("Storage error: {0}")]
    S3(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg.clone())
            }
            AppError::FailedPrecondition(msg) => (
                StatusCode::PRECONDITION_FAILED,
                "FAILED_PRECONDITION",
                msg.clone(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "PERMISSION_DENIED",
                "Access denied".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(e) => {
                // Upstream status and body stay in the logs only.
                tracing::error!("Model call failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "The AI service could not complete the request".to_string(),
                )
            }
            AppError::Repair(e) => {
                tracing::error!("Response repair failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    format!("The AI response could not be repaired: {e}"),
                )
            }
            AppError::ModelContract(msg) => {
                tracing::error!("Model output contract violation: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    format!("The AI response was not in the expected format: {msg}"),
                )
            }
            AppError::S3(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
