//! Billing-cycle normalization: MRR and ARR.
//!
//! Normalizes arbitrary billing cycles into a common monthly figure. Division
//! stays at full decimal precision; rounding to 2 decimals happens only when
//! a figure is presented.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{BillingCycle, Subscription};

/// Normalizes a billed amount to its monthly value.
///
/// - monthly → amount
/// - quarterly → amount / 3
/// - annual → amount / 12
///
/// Unknown cycles (a `None` from [`BillingCycle::parse`]) contribute zero at
/// the call site; this is an explicit fallback, not an error.
#[must_use]
pub fn monthly_value(amount: Decimal, cycle: BillingCycle) -> Decimal {
    amount / Decimal::from(cycle.months())
}

/// Annual recurring revenue for a billed amount: `monthly_value * 12`.
///
/// Always derived, never stored independently.
#[must_use]
pub fn annual_value(amount: Decimal, cycle: BillingCycle) -> Decimal {
    monthly_value(amount, cycle) * Decimal::from(12u32)
}

/// Total MRR across a set of subscriptions.
///
/// Only MRR-attributing statuses (trial, active, past-due) contribute;
/// paused, cancelled, and expired subscriptions count as zero.
#[must_use]
pub fn mrr(subscriptions: &[Subscription]) -> Decimal {
    subscriptions.iter().map(Subscription::monthly_value).sum()
}

/// Aggregate churn figures as reported by the revenue service.
///
/// Churn rate is authoritative upstream (cancelled-this-period divided by
/// active-at-period-start). The core never recomputes it; this type only
/// mirrors the server value for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnStats {
    /// Subscriptions cancelled during the period.
    pub cancelled_in_period: u64,
    /// Subscriptions active at the start of the period.
    pub active_at_period_start: u64,
    /// Server-computed churn rate, percentage.
    pub churn_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fathom_shared::types::{ClientId, SubscriptionId};
    use rust_decimal_macros::dec;

    use crate::subscription::types::SubscriptionStatus;

    fn subscription(
        amount: Decimal,
        cycle: BillingCycle,
        status: SubscriptionStatus,
    ) -> Subscription {
        Subscription {
            id: SubscriptionId::new(),
            name: "Support plan".to_string(),
            client_id: ClientId::new(),
            contract_id: None,
            amount,
            billing_cycle: Some(cycle),
            status,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            next_billing_date: None,
            cancelled_date: None,
            auto_renewal: true,
        }
    }

    // Scenario C: amount=120 quarterly → MRR=40.00, ARR=480.00.
    #[test]
    fn test_quarterly_normalization() {
        assert_eq!(monthly_value(dec!(120), BillingCycle::Quarterly), dec!(40));
        assert_eq!(annual_value(dec!(120), BillingCycle::Quarterly), dec!(480));
    }

    #[test]
    fn test_monthly_is_identity() {
        assert_eq!(monthly_value(dec!(99.50), BillingCycle::Monthly), dec!(99.50));
    }

    #[test]
    fn test_annual_normalization() {
        assert_eq!(monthly_value(dec!(1200), BillingCycle::Annual), dec!(100));
        assert_eq!(annual_value(dec!(1200), BillingCycle::Annual), dec!(1200));
    }

    #[test]
    fn test_mrr_skips_non_attributing_statuses() {
        let subs = vec![
            subscription(dec!(120), BillingCycle::Quarterly, SubscriptionStatus::Active),
            subscription(dec!(50), BillingCycle::Monthly, SubscriptionStatus::Trial),
            subscription(dec!(600), BillingCycle::Annual, SubscriptionStatus::PastDue),
            subscription(dec!(999), BillingCycle::Monthly, SubscriptionStatus::Paused),
            subscription(dec!(999), BillingCycle::Monthly, SubscriptionStatus::Cancelled),
        ];
        // 40 + 50 + 50 = 140; paused and cancelled contribute nothing.
        assert_eq!(mrr(&subs), dec!(140));
    }

    #[test]
    fn test_mrr_empty() {
        assert_eq!(mrr(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_mrr_unknown_cycle_contributes_zero() {
        let mut unrecognized =
            subscription(dec!(75), BillingCycle::Monthly, SubscriptionStatus::Active);
        unrecognized.billing_cycle = None;
        let subs = vec![
            unrecognized,
            subscription(dec!(50), BillingCycle::Monthly, SubscriptionStatus::Active),
        ];
        assert_eq!(mrr(&subs), dec!(50));
    }
}
