//! HTTP error mapping.
//!
//! Domain errors ([`CoreError`]) and database errors (sqlx) are folded into
//! a single [`AppError`] that renders a consistent JSON body:
//! `{"error": <message>, "code": <stable code>}`. 500-class responses never
//! echo driver or internal text; that goes to the log instead.

use atelier_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain error from `atelier_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request the domain layer never saw.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An infrastructure failure (token signing, hashing, file I/O).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, detail) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string(), None)
                }
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_FAILED",
                    msg.clone(),
                    None,
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
                CoreError::Unauthorized(msg) => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    msg.clone(),
                    None,
                ),
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "internal domain error");
                    internal_response(msg.clone())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                internal_response(msg.clone())
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        // Diagnostics are only ever attached to local debug builds.
        if cfg!(debug_assertions) {
            if let Some(detail) = detail {
                body["detail"] = json!(detail);
            }
        }

        (status, axum::Json(body)).into_response()
    }
}

/// A sanitized 500 with the real cause preserved for debug builds.
fn internal_response(detail: String) -> (StatusCode, &'static str, String, Option<String>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        Some(detail),
    )
}

/// Classify a sqlx error into status, code, message, and optional detail.
///
/// `RowNotFound` maps to 404. Postgres unique violations (SQLSTATE 23505)
/// on a `uq_*` constraint map to 409, which covers duplicate user emails
/// and duplicate invoice numbers. Everything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String, Option<String>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                        None,
                    );
                }
            }
            tracing::error!(error = %db_err, "database error");
            internal_response(db_err.to_string())
        }
        other => {
            tracing::error!(error = %other, "database error");
            internal_response(other.to_string())
        }
    }
}
