//! The one error type every handler returns.
//!
//! Every failure renders as `{"error": <message>, "code": <CODE>}`. Internal
//! and database details are logged, never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use atelier_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Validation, lookup and auth failures raised by core or handlers.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Anything a repository call returned; classified by SQLSTATE.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request (unreadable body, bad query string).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A failure outside the database, e.g. hashing or token signing.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Unauthorized(msg.into()))
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::InvalidInput(msg.into()))
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::BackendUnavailable(msg) => {
                    tracing::error!(error = %msg, "Backend unavailable");
                    backend_unavailable()
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn backend_unavailable() -> (StatusCode, &'static str, String) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "BACKEND_UNAVAILABLE",
        "The database is temporarily unavailable".to_string(),
    )
}

/// | sqlx error                                   | Status |
/// |----------------------------------------------|--------|
/// | `RowNotFound`                                | 404    |
/// | `23505` on a `uq_*` constraint               | 409    |
/// | `23503` (foreign key), `23514` (check)       | 400    |
/// | pool timeout/closed, I/O, TLS                | 503    |
/// | anything else                                | 500    |
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                Some("23503") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "INVALID_INPUT",
                        format!("Referenced record does not exist: {constraint}"),
                    );
                }
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "INVALID_INPUT",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => {
            tracing::error!(error = %err, "Database unreachable");
            backend_unavailable()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
