//! Error types for the equipment server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The stock-adjustment loop stopped mid-sequence. Updates listed in
    /// `applied` went through and are not rolled back.
    #[error("Stock adjustment aborted at '{failed}': {cause}")]
    PartialFailure {
        applied: Vec<String>,
        failed: String,
        cause: String,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Store(_) => "Store",
            AppError::NotFound(_) => "NotFound",
            AppError::Validation(_) => "Validation",
            AppError::PartialFailure { .. } => "PartialFailure",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Ids whose quantity changed before a partial stock-adjustment
    /// failure, in application order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, applied) = match &self {
            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, None),
            AppError::PartialFailure { applied, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(applied.clone()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message: self.to_string(),
            applied,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::Store("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::NotFound("eq-1".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Internal("oops".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn partial_failure_keeps_applied_ids() {
        let err = AppError::PartialFailure {
            applied: vec!["a".into()],
            failed: "b".into(),
            cause: "throttled".into(),
        };
        assert_eq!(err.kind(), "PartialFailure");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
