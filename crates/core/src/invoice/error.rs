//! Invoice error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::InvoiceStatus;

/// Errors that can occur during invoice ledger operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// A line item with content is missing its description.
    #[error("Description is required")]
    DescriptionRequired {
        /// Zero-based index of the offending row.
        row: usize,
    },

    /// Payment amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositivePayment,

    /// Payment amount exceeds the current balance due.
    #[error("Amount cannot exceed balance due")]
    PaymentExceedsBalance {
        /// The attempted payment amount.
        amount: Decimal,
        /// The balance due at entry time.
        balance: Decimal,
    },

    /// Payments can only be recorded against sent/viewed/partial/overdue invoices.
    #[error("Invoice in status {0} does not accept payments")]
    PaymentNotAccepted(InvoiceStatus),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: InvoiceStatus,
        /// The attempted target status.
        to: InvoiceStatus,
    },

    /// Manual status edits are only permitted while the invoice is a draft.
    #[error("Status can only be edited manually while draft (current: {0})")]
    ManualEditNotAllowed(InvoiceStatus),
}

impl InvoiceError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DescriptionRequired { .. } => "DESCRIPTION_REQUIRED",
            Self::NonPositivePayment => "NON_POSITIVE_PAYMENT",
            Self::PaymentExceedsBalance { .. } => "PAYMENT_EXCEEDS_BALANCE",
            Self::PaymentNotAccepted(_) => "PAYMENT_NOT_ACCEPTED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ManualEditNotAllowed(_) => "MANUAL_EDIT_NOT_ALLOWED",
        }
    }

    /// Returns true if this is a client-side validation error that blocks
    /// submission (never sent to the server).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DescriptionRequired { .. }
                | Self::NonPositivePayment
                | Self::PaymentExceedsBalance { .. }
        )
    }
}

impl From<InvoiceError> for fathom_shared::AppError {
    fn from(err: InvoiceError) -> Self {
        if err.is_validation() {
            Self::Validation(err.to_string())
        } else {
            Self::Conflict(err.to_string())
        }
    }
}
