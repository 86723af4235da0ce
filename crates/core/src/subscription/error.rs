//! Subscription error types.

use thiserror::Error;

use super::types::SubscriptionStatus;

/// Errors that can occur during subscription lifecycle operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: SubscriptionStatus,
        /// The attempted target status.
        to: SubscriptionStatus,
    },

    /// Cancellation requires a cancellation date.
    #[error("Cancellation date is required")]
    CancellationDateRequired,
}

impl SubscriptionError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::CancellationDateRequired => "CANCELLATION_DATE_REQUIRED",
        }
    }
}

impl From<SubscriptionError> for fathom_shared::AppError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::CancellationDateRequired => Self::Validation(err.to_string()),
            SubscriptionError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = SubscriptionError::InvalidTransition {
            from: SubscriptionStatus::Cancelled,
            to: SubscriptionStatus::Active,
        };
        assert!(err.to_string().contains("cancelled"));
        assert!(err.to_string().contains("active"));
    }
}
