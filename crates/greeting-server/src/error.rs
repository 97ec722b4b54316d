//! Server error type
//!
//! [`AppError`] is the only error type handlers return. It renders as
//! `{"success": false, "error": {"code", "message"}}`.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::audit::AuditError;

/// Result alias for handlers
pub type ApiResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Audit store error: {0}")]
    Store(#[from] AuditError),

    /// Failure requested through the simulate endpoint
    #[error("Simulated error: {0}")]
    SimulatedFailure(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(AuditError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::SimulatedFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) | AppError::Store(AuditError::Validation(_)) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Store(_) => "INTERNAL_ERROR",
            AppError::SimulatedFailure(_) => "SIMULATED_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
            AppError::Store(AuditError::Validation(msg)) => msg,
            AppError::Store(ref err) => {
                tracing::error!(error = %err, "Audit store failure");
                "An internal error occurred".to_string()
            },
            AppError::SimulatedFailure(msg) => {
                tracing::warn!("Simulated failure: {}", msg);
                msg
            },
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
