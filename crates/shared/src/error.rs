//! Application-wide error types.
//!
//! The taxonomy mirrors how failures surface to the user: validation errors
//! are client-detectable and block submission, conflicts come back from the
//! server on illegal state transitions, not-found renders an explicit empty
//! state, and network failures surface immediately with retry left to the
//! user. Bulk-confirm partial failure is a first-class outcome, not an error.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-side validation failure. Never sent to the server.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server-detected conflict (invalid state transition, duplicate).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity missing or deleted concurrently.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication failed and could not be transparently refreshed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Transport-level failure (timeout, connection refused, bad gateway).
    #[error("Network error: {0}")]
    Network(String),

    /// Server rejected the request with a payload-supplied message.
    #[error("{0}")]
    Api(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Api(_) => "API_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the failure is safe for the user to simply retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Maps an HTTP status code and server message into the taxonomy.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 | 422 => Self::Conflict(message),
            _ => Self::Api(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Unauthorized(String::new()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(AppError::Network(String::new()).error_code(), "NETWORK_ERROR");
        assert_eq!(AppError::Api(String::new()).error_code(), "API_ERROR");
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            AppError::from_status(404, "gone".into()),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from_status(409, "dup".into()),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from_status(422, "bad transition".into()),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from_status(400, "missing field".into()),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from_status(500, "boom".into()),
            AppError::Api(_)
        ));
    }

    #[test]
    fn test_only_network_is_retryable() {
        assert!(AppError::Network("timeout".into()).is_retryable());
        assert!(!AppError::Conflict("dup".into()).is_retryable());
        assert!(!AppError::Validation("missing".into()).is_retryable());
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = AppError::Api("Invoice is already paid".into());
        assert_eq!(err.to_string(), "Invoice is already paid");
    }
}
