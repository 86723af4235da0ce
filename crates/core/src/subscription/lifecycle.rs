//! Subscription status transitions.
//!
//! `pause`, `resume`, and `cancel` are explicit user operations; transitions
//! to past-due and expired are server-derived events the client only
//! mirrors. Cancelling stamps a cancellation date, after which the
//! subscription stops attributing MRR.

use chrono::NaiveDate;

use super::error::SubscriptionError;
use super::types::SubscriptionStatus;

/// Outcome of a subscription cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    /// The new status (`Cancelled`).
    pub new_status: SubscriptionStatus,
    /// Date MRR attribution ends.
    pub cancelled_date: NaiveDate,
    /// Optional user-supplied reason.
    pub reason: Option<String>,
}

/// Stateless service for subscription status transitions.
pub struct SubscriptionLifecycle;

impl SubscriptionLifecycle {
    /// Activate a trial or recover a past-due subscription.
    pub fn activate(current: SubscriptionStatus) -> Result<SubscriptionStatus, SubscriptionError> {
        match current {
            SubscriptionStatus::Trial | SubscriptionStatus::PastDue => {
                Ok(SubscriptionStatus::Active)
            }
            _ => Err(SubscriptionError::InvalidTransition {
                from: current,
                to: SubscriptionStatus::Active,
            }),
        }
    }

    /// Pause an active subscription.
    pub fn pause(current: SubscriptionStatus) -> Result<SubscriptionStatus, SubscriptionError> {
        match current {
            SubscriptionStatus::Active => Ok(SubscriptionStatus::Paused),
            _ => Err(SubscriptionError::InvalidTransition {
                from: current,
                to: SubscriptionStatus::Paused,
            }),
        }
    }

    /// Resume a paused subscription.
    pub fn resume(current: SubscriptionStatus) -> Result<SubscriptionStatus, SubscriptionError> {
        match current {
            SubscriptionStatus::Paused => Ok(SubscriptionStatus::Active),
            _ => Err(SubscriptionError::InvalidTransition {
                from: current,
                to: SubscriptionStatus::Active,
            }),
        }
    }

    /// Cancel a subscription, stamping the cancellation date.
    ///
    /// Reachable from active, past-due, and paused. MRR attribution for the
    /// subscription stops as of `cancelled_date`.
    pub fn cancel(
        current: SubscriptionStatus,
        cancelled_date: Option<NaiveDate>,
        reason: Option<String>,
    ) -> Result<Cancellation, SubscriptionError> {
        let cancelled_date = cancelled_date.ok_or(SubscriptionError::CancellationDateRequired)?;
        match current {
            SubscriptionStatus::Active
            | SubscriptionStatus::PastDue
            | SubscriptionStatus::Paused => Ok(Cancellation {
                new_status: SubscriptionStatus::Cancelled,
                cancelled_date,
                reason,
            }),
            _ => Err(SubscriptionError::InvalidTransition {
                from: current,
                to: SubscriptionStatus::Cancelled,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Includes the server-derived transitions (active → past_due,
    /// active → expired) so the table matches what can be observed on read.
    #[must_use]
    pub fn is_valid_transition(from: SubscriptionStatus, to: SubscriptionStatus) -> bool {
        matches!(
            (from, to),
            (SubscriptionStatus::Trial, SubscriptionStatus::Active)
                | (
                    SubscriptionStatus::Active,
                    SubscriptionStatus::PastDue
                        | SubscriptionStatus::Paused
                        | SubscriptionStatus::Cancelled
                        | SubscriptionStatus::Expired
                )
                | (
                    SubscriptionStatus::PastDue,
                    SubscriptionStatus::Active | SubscriptionStatus::Cancelled
                )
                | (
                    SubscriptionStatus::Paused,
                    SubscriptionStatus::Active | SubscriptionStatus::Cancelled
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trial_to_active() {
        assert_eq!(
            SubscriptionLifecycle::activate(SubscriptionStatus::Trial).unwrap(),
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn test_past_due_recovers_to_active() {
        assert_eq!(
            SubscriptionLifecycle::activate(SubscriptionStatus::PastDue).unwrap(),
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn test_pause_resume_cycle() {
        let paused = SubscriptionLifecycle::pause(SubscriptionStatus::Active).unwrap();
        assert_eq!(paused, SubscriptionStatus::Paused);
        assert_eq!(
            SubscriptionLifecycle::resume(paused).unwrap(),
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn test_pause_requires_active() {
        assert!(matches!(
            SubscriptionLifecycle::pause(SubscriptionStatus::Trial),
            Err(SubscriptionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_stamps_date_and_reason() {
        let cancellation = SubscriptionLifecycle::cancel(
            SubscriptionStatus::PastDue,
            Some(date(2026, 4, 2)),
            Some("non-payment".to_string()),
        )
        .unwrap();
        assert_eq!(cancellation.new_status, SubscriptionStatus::Cancelled);
        assert_eq!(cancellation.cancelled_date, date(2026, 4, 2));
        assert_eq!(cancellation.reason.as_deref(), Some("non-payment"));
    }

    #[test]
    fn test_cancel_requires_date() {
        assert!(matches!(
            SubscriptionLifecycle::cancel(SubscriptionStatus::Active, None, None),
            Err(SubscriptionError::CancellationDateRequired)
        ));
    }

    #[test]
    fn test_cancel_from_terminal_fails() {
        for from in [SubscriptionStatus::Cancelled, SubscriptionStatus::Expired] {
            assert!(matches!(
                SubscriptionLifecycle::cancel(from, Some(date(2026, 4, 2)), None),
                Err(SubscriptionError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(SubscriptionLifecycle::is_valid_transition(
            SubscriptionStatus::Trial,
            SubscriptionStatus::Active
        ));
        assert!(SubscriptionLifecycle::is_valid_transition(
            SubscriptionStatus::Active,
            SubscriptionStatus::Expired
        ));
        assert!(SubscriptionLifecycle::is_valid_transition(
            SubscriptionStatus::Paused,
            SubscriptionStatus::Cancelled
        ));
        assert!(!SubscriptionLifecycle::is_valid_transition(
            SubscriptionStatus::Cancelled,
            SubscriptionStatus::Active
        ));
        assert!(!SubscriptionLifecycle::is_valid_transition(
            SubscriptionStatus::Trial,
            SubscriptionStatus::Paused
        ));
    }
}
