/// Unified error types for the Marquee admin core
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for admin operations
#[derive(Error, Debug)]
pub enum AdminError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Missing or unauthenticated actor identity
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Request validation errors (e.g. empty block reason)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown account id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lifecycle precondition not met (e.g. unblocking a non-blocked account)
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Serializable classification of a failure, used in bulk outcomes and by
/// console clients deciding how to report a per-id error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidTransition,
    /// Network/connection failure before any HTTP status was received.
    /// Produced only by remote-store deployments.
    Transport,
    /// Backend/infrastructure failure (5xx-class).
    Server,
}

impl AdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::Validation(_) => ErrorKind::Validation,
            AdminError::NotFound(_) => ErrorKind::NotFound,
            AdminError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            AdminError::Authentication(_) => ErrorKind::Validation,
            AdminError::Database(_) | AdminError::Internal(_) => ErrorKind::Server,
        }
    }
}

/// Error response body in the console's envelope format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Convert AdminError to an HTTP response
impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AdminError::Authentication(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AdminError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AdminError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AdminError::InvalidTransition(_) => (StatusCode::CONFLICT, self.to_string()),
            AdminError::Database(_) | AdminError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for admin operations
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AdminError::Validation("reason required".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AdminError::NotFound("no such account".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AdminError::InvalidTransition("not blocked".into()).kind(),
            ErrorKind::InvalidTransition
        );
        assert_eq!(
            AdminError::Internal("boom".into()).kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::InvalidTransition).unwrap(),
            "\"invalid_transition\""
        );
        assert_eq!(serde_json::to_string(&ErrorKind::NotFound).unwrap(), "\"not_found\"");
    }
}
