//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use haulbook_core::ledger::LedgerError;
use haulbook_core::reports::ReportError;
use haulbook_shared::AppError;
use haulbook_store::StoreError;
use serde_json::json;
use tracing::error;

/// Error returned by handlers, rendered as `{ "error": code, "message": text }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self(AppError::NotFound(err.to_string())),
            StoreError::Duplicate { .. } => Self(AppError::Validation(err.to_string())),
            StoreError::Io(_) | StoreError::Malformed(_) => {
                error!(error = %err, "Store operation failed");
                Self(AppError::Store(err.to_string()))
            }
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownEntityType(_) => Self(AppError::Validation(err.to_string())),
            LedgerError::BalanceDrift { .. } => Self(AppError::Internal(err.to_string())),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
