//! Contract error types.

use thiserror::Error;

use super::types::ContractStatus;

/// Errors that can occur during contract lifecycle operations.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ContractStatus,
        /// The attempted target status.
        to: ContractStatus,
    },

    /// Signing requires a signed date.
    #[error("Signed date is required")]
    SignedDateRequired,

    /// Attempted to edit a contract in a terminal state.
    #[error("Contract in status {0} can no longer be edited")]
    NotEditable(ContractStatus),
}

impl ContractError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::SignedDateRequired => "SIGNED_DATE_REQUIRED",
            Self::NotEditable(_) => "NOT_EDITABLE",
        }
    }
}

impl From<ContractError> for fathom_shared::AppError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::SignedDateRequired => Self::Validation(err.to_string()),
            ContractError::InvalidTransition { .. } | ContractError::NotEditable(_) => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
