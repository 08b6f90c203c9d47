use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaveError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("You have reached the maximum of {limit} waiting leave requests")]
    QuotaExceeded { limit: i64 },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Leave request {id} has already been decided")]
    AlreadyDecided { id: i64 },

    #[error("Email already exists, please use a different email")]
    DuplicateEmail,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type LeaveResult<T> = Result<T, LeaveError>;

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::InvalidCredentials | LeaveError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LeaveError::NotFound(_) => StatusCode::NOT_FOUND,
            LeaveError::QuotaExceeded { .. }
            | LeaveError::AlreadyDecided { .. }
            | LeaveError::DuplicateEmail
            | LeaveError::UsernameTaken => StatusCode::CONFLICT,
            LeaveError::Forbidden(_) => StatusCode::FORBIDDEN,
            LeaveError::Validation(_) => StatusCode::BAD_REQUEST,
            LeaveError::Storage(_) | LeaveError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            LeaveError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                "Internal Server Error".to_string()
            }
            LeaveError::Internal(e) => {
                tracing::error!(error = %e, "internal failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
