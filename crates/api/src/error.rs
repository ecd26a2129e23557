use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pictura_album::AlbumError;
use pictura_core::error::CoreError;
use pictura_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors of the workspace crates and implements
/// [`IntoResponse`] to produce consistent `{error, code}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pictura-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A pipeline-level error (validation, setup, supersession).
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A compositing or export error.
    #[error(transparent)]
    Album(#[from] AlbumError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource with a human-readable description.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A route that needs persistence while none is configured.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => core_response(core),

            AppError::Pipeline(pipeline) => match pipeline {
                PipelineError::Core(core) => core_response(core),
                PipelineError::Setup(msg) => (StatusCode::BAD_GATEWAY, "SETUP_FAILED", msg.clone()),
                PipelineError::Superseded => (
                    StatusCode::CONFLICT,
                    "SUPERSEDED",
                    "A newer run replaced this one.".to_string(),
                ),
            },

            AppError::Album(album) => match album {
                // User-correctable export requests.
                AlbumError::NoImages | AlbumError::InvalidRatio(_) => {
                    (StatusCode::BAD_REQUEST, "DOWNLOAD_FAILED", album.to_string())
                }
                other => {
                    tracing::error!(error = %other, "Export composition failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DOWNLOAD_FAILED",
                        "Sorry, the download failed. Please try again.".to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{what} not found"),
            ),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a [`CoreError`] to an HTTP status, code, and user-facing message.
fn core_response(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::NotFound { entity, index } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} at index {index} not found"),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// Persistence errors never expose internals; everything unexpected is
/// a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
