//! Contract lifecycle state transitions.
//!
//! Each operation validates against the current status and returns a
//! [`LifecycleAction`] describing the transition; invalid transitions fail
//! with a state-conflict error and mutate nothing. The same transition table
//! decides what the UI offers and what the validation layer accepts.

use chrono::NaiveDate;

use super::error::ContractError;
use super::types::ContractStatus;

/// A validated contract lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Send a draft out for signature.
    Sign {
        /// The new status (`PendingSignature`).
        new_status: ContractStatus,
        /// The date the contract was signed.
        signed_date: NaiveDate,
    },
    /// Activate a signed contract.
    Activate {
        /// The new status (`Active`).
        new_status: ContractStatus,
    },
    /// Complete an active contract.
    Complete {
        /// The new status (`Completed`).
        new_status: ContractStatus,
    },
    /// Cancel a non-terminal contract.
    Cancel {
        /// The new status (`Cancelled`).
        new_status: ContractStatus,
    },
}

impl LifecycleAction {
    /// Returns the status this action moves the contract to.
    #[must_use]
    pub fn new_status(&self) -> ContractStatus {
        match self {
            Self::Sign { new_status, .. }
            | Self::Activate { new_status }
            | Self::Complete { new_status }
            | Self::Cancel { new_status } => *new_status,
        }
    }

    /// Returns true if this action makes the owning client's cached revenue
    /// aggregates stale.
    ///
    /// Activating or completing a contract changes recognized revenue; the
    /// consuming layer must refetch revenue figures afterwards.
    #[must_use]
    pub fn invalidates_revenue(&self) -> bool {
        matches!(self, Self::Activate { .. } | Self::Complete { .. })
    }
}

/// Stateless service for contract lifecycle transitions.
pub struct ContractLifecycle;

impl ContractLifecycle {
    /// Sign a draft contract, moving it to pending signature.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::SignedDateRequired` when no signed date is
    /// provided, or `ContractError::InvalidTransition` when not a draft.
    pub fn sign(
        current: ContractStatus,
        signed_date: Option<NaiveDate>,
    ) -> Result<LifecycleAction, ContractError> {
        let signed_date = signed_date.ok_or(ContractError::SignedDateRequired)?;
        match current {
            ContractStatus::Draft => Ok(LifecycleAction::Sign {
                new_status: ContractStatus::PendingSignature,
                signed_date,
            }),
            _ => Err(ContractError::InvalidTransition {
                from: current,
                to: ContractStatus::PendingSignature,
            }),
        }
    }

    /// Activate a contract that is pending signature.
    pub fn activate(current: ContractStatus) -> Result<LifecycleAction, ContractError> {
        match current {
            ContractStatus::PendingSignature => Ok(LifecycleAction::Activate {
                new_status: ContractStatus::Active,
            }),
            _ => Err(ContractError::InvalidTransition {
                from: current,
                to: ContractStatus::Active,
            }),
        }
    }

    /// Complete an active contract.
    pub fn complete(current: ContractStatus) -> Result<LifecycleAction, ContractError> {
        match current {
            ContractStatus::Active => Ok(LifecycleAction::Complete {
                new_status: ContractStatus::Completed,
            }),
            _ => Err(ContractError::InvalidTransition {
                from: current,
                to: ContractStatus::Completed,
            }),
        }
    }

    /// Cancel a contract from any non-terminal state.
    pub fn cancel(current: ContractStatus) -> Result<LifecycleAction, ContractError> {
        match current {
            ContractStatus::Draft | ContractStatus::PendingSignature | ContractStatus::Active => {
                Ok(LifecycleAction::Cancel {
                    new_status: ContractStatus::Cancelled,
                })
            }
            _ => Err(ContractError::InvalidTransition {
                from: current,
                to: ContractStatus::Cancelled,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → PendingSignature (sign)
    /// - PendingSignature → Active (activate)
    /// - Active → Completed (complete)
    /// - Draft/PendingSignature/Active → Cancelled (cancel)
    /// - Active → Expired (server-derived, never user-triggered)
    #[must_use]
    pub fn is_valid_transition(from: ContractStatus, to: ContractStatus) -> bool {
        matches!(
            (from, to),
            (ContractStatus::Draft, ContractStatus::PendingSignature)
                | (ContractStatus::PendingSignature, ContractStatus::Active)
                | (
                    ContractStatus::Active,
                    ContractStatus::Completed | ContractStatus::Expired
                )
                | (
                    ContractStatus::Draft
                        | ContractStatus::PendingSignature
                        | ContractStatus::Active,
                    ContractStatus::Cancelled
                )
        )
    }

    /// Derives the effective status for display, folding in expiry.
    ///
    /// An active contract whose end date has passed reads as expired. The
    /// exact trigger lives in the system of record; the client only mirrors
    /// what the server would derive.
    #[must_use]
    pub fn effective_status(
        status: ContractStatus,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> ContractStatus {
        match (status, end_date) {
            (ContractStatus::Active, Some(end)) if end < today => ContractStatus::Expired,
            _ => status,
        }
    }
}
