//! Application-wide error types.

use thiserror::Error;

/// Application error types surfaced by the service layer.
///
/// The balance core never fails on data shape; these cover the
/// collaborators around it (tokens, store access, request validation).
#[derive(Debug, Error)]
pub enum AppError {
    /// Bearer token missing, expired or malformed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Trip, party, driver or supplier not found for this user.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request parameters rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store unreachable or failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Store(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
