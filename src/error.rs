//! Application errors and the JSON envelope they are served in

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Numeric error codes carried in every error body.
///
/// The storefront and the admin UI branch on these rather than on the HTTP
/// status alone; redemption rejections in particular need the specific reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    Duplicate = 5,
    BadValue = 6,
    CodeInactive = 7,
    CodeExpired = 8,
    CodeExhausted = 9,
}

impl ErrorCode {
    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Failure => "Failure",
            ErrorCode::NotAuthorized => "NotAuthorized",
            ErrorCode::DbFailure => "DbFailure",
            ErrorCode::NoSuchData => "NoSuchData",
            ErrorCode::Duplicate => "Duplicate",
            ErrorCode::BadValue => "BadValue",
            ErrorCode::CodeInactive => "CodeInactive",
            ErrorCode::CodeExpired => "CodeExpired",
            ErrorCode::CodeExhausted => "CodeExhausted",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Consultation-code rejection carrying the specific reason code
    #[error("{1}")]
    CodeRejected(ErrorCode, String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BusinessRule(_) | AppError::CodeRejected(..) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) | AppError::Authorization(_) => ErrorCode::NotAuthorized,
            AppError::NotFound(_) => ErrorCode::NoSuchData,
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorCode::BadValue,
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Internal(_) | AppError::BusinessRule(_) => ErrorCode::Failure,
            AppError::CodeRejected(code, _) => *code,
        }
    }

    /// What the client gets to see. Server-side failures keep their detail
    /// in the logs only.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.public_message();
        let code = self.code();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: code.name().to_string(),
            message,
        });

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Authentication("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::CodeRejected(ErrorCode::CodeExpired, "x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_rejection_keeps_its_reason_code() {
        let e = AppError::CodeRejected(ErrorCode::CodeExhausted, "cap reached".into());
        assert_eq!(e.code(), ErrorCode::CodeExhausted);
        assert_eq!(e.public_message(), "cap reached");
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let e = AppError::Internal("connection pool exhausted".into());
        assert_eq!(e.public_message(), "Internal server error");
    }
}
