use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the catalog index and the match engine.
///
/// `DatasetLoad`, `Schema` and `Vectorization` only happen while the catalog is built
/// at startup and leave the recommender unavailable for the life of the process.
/// `InvalidInput` and `NotFound` are per-request and never touch engine state.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load job catalog: {0}")]
    DatasetLoad(String),

    #[error("Job catalog is missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("Failed to vectorize job catalog: {0}")]
    Vectorization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Job with ID {0} not found")]
    NotFound(String),
}

impl EngineError {
    /// True for the startup-time kinds that make the engine unavailable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::DatasetLoad(_) | EngineError::Schema(_) | EngineError::Vectorization(_)
        )
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Recommendation history is not configured")]
    HistoryDisabled,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        if err.is_fatal() {
            return AppError::ServiceUnavailable(err.to_string());
        }
        match err {
            EngineError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::NotFound(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Recommendation service is not available".to_string(),
                )
            }
            AppError::HistoryDisabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "HISTORY_DISABLED",
                "Recommendation history is not configured".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
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
