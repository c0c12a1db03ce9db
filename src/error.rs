//! Error types for LaptopMS server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes exposed in the JSON error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotFound = 2,
    DuplicateId = 3,
    DuplicateSerial = 4,
    IllegalTransition = 5,
    AlreadyActive = 6,
    AlreadyClosed = 7,
    RepairInProgress = 8,
    InvalidCost = 9,
    InvalidInput = 10,
    InvariantViolation = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0} is already registered")]
    DuplicateId(String),

    #[error("Duplicate serial number: {0} is already registered")]
    DuplicateSerial(String),

    #[error("Cannot {operation} {id}: illegal transition {from} -> {to}")]
    IllegalTransition {
        operation: &'static str,
        id: String,
        from: String,
        to: String,
    },

    #[error("Asset {0} already has an active handout")]
    AlreadyActive(String),

    #[error("Handout {0} is already returned")]
    AlreadyClosed(String),

    #[error("Asset {0} already has an open repair ticket")]
    RepairInProgress(String),

    #[error("Invalid repair cost: {0} (must be non-negative)")]
    InvalidCost(f64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl AppError {
    /// Build an `IllegalTransition` from the attempted operation and the
    /// observed/target states of the entity it was refused on.
    pub fn illegal_transition(
        operation: &'static str,
        id: impl Into<String>,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        AppError::IllegalTransition {
            operation,
            id: id.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string().replace('\n', "; "))
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
        let message = self.to_string();
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::DuplicateId(_) => (StatusCode::CONFLICT, ErrorCode::DuplicateId),
            AppError::DuplicateSerial(_) => (StatusCode::CONFLICT, ErrorCode::DuplicateSerial),
            AppError::IllegalTransition { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::IllegalTransition)
            }
            AppError::AlreadyActive(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyActive),
            AppError::AlreadyClosed(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyClosed),
            AppError::RepairInProgress(_) => (StatusCode::CONFLICT, ErrorCode::RepairInProgress),
            AppError::InvalidCost(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidCost),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
            AppError::InvariantViolation(msg) => {
                // Indicates internal inconsistency, not a caller mistake
                tracing::error!("Invariant violation: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InvariantViolation,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
