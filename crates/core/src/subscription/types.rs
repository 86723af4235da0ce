//! Subscription domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use fathom_shared::types::{ClientId, ContractId, SubscriptionId};

/// Billing cycle of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// Billed every month.
    Monthly,
    /// Billed every three months.
    Quarterly,
    /// Billed once a year.
    Annual,
}

impl BillingCycle {
    /// Returns the wire representation of the cycle.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    /// Parses a cycle from its wire representation.
    ///
    /// Unknown cycles are `None`; MRR normalization treats them as zero
    /// contribution rather than an error.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "annual" | "yearly" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Number of months covered by one billing period.
    #[must_use]
    pub const fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Annual => 12,
        }
    }
}

/// Subscription status.
///
/// The valid transitions are:
/// - Trial → Active
/// - Active → PastDue / Paused / Cancelled / Expired
/// - PastDue → Active (late payment) / Cancelled (giving up)
/// - Paused → Active (resume) / Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In a trial period.
    Trial,
    /// Billing normally.
    Active,
    /// A renewal payment failed.
    PastDue,
    /// Temporarily paused by agreement.
    Paused,
    /// Cancelled; MRR attribution stops at the cancellation date.
    Cancelled,
    /// Lapsed without renewal (server-derived, terminal).
    Expired,
}

impl SubscriptionStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trial" => Some(Self::Trial),
            "active" => Some(Self::Active),
            "past_due" => Some(Self::PastDue),
            "paused" => Some(Self::Paused),
            "cancelled" => Some(Self::Cancelled),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Expired)
    }

    /// Returns true if the subscription contributes to MRR.
    ///
    /// Trial and past-due subscriptions still attribute revenue; paused and
    /// terminated ones contribute zero.
    #[must_use]
    pub fn attributes_mrr(&self) -> bool {
        matches!(self, Self::Trial | Self::Active | Self::PastDue)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepts any string for the billing cycle, mapping unrecognized values
/// to `None` instead of failing the whole payload.
fn lenient_cycle<'de, D>(deserializer: D) -> Result<Option<BillingCycle>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(BillingCycle::parse))
}

/// A subscription as mirrored from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Display name.
    pub name: String,
    /// Owning client (required; may dangle after client deletion).
    pub client_id: ClientId,
    /// Optional linked contract.
    pub contract_id: Option<ContractId>,
    /// Amount billed per cycle.
    pub amount: Decimal,
    /// Billing cycle; `None` when the server reports a cycle this model
    /// does not recognize. Unknown cycles contribute zero MRR.
    #[serde(deserialize_with = "lenient_cycle")]
    pub billing_cycle: Option<BillingCycle>,
    /// Current status.
    pub status: SubscriptionStatus,
    /// Start date.
    pub start_date: NaiveDate,
    /// Next billing date (server-derived, stored).
    pub next_billing_date: Option<NaiveDate>,
    /// Cancellation date, set on cancel.
    pub cancelled_date: Option<NaiveDate>,
    /// Whether the subscription renews automatically.
    pub auto_renewal: bool,
}

impl Subscription {
    /// Returns this subscription's monthly recurring revenue contribution.
    ///
    /// Zero once the status stops attributing MRR (paused, cancelled,
    /// expired) or when the billing cycle is unrecognized.
    #[must_use]
    pub fn monthly_value(&self) -> Decimal {
        match self.billing_cycle {
            Some(cycle) if self.status.attributes_mrr() => {
                super::billing::monthly_value(self.amount, cycle)
            }
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_cycle_reads_as_none_and_contributes_zero() {
        let raw = r#"{
            "id": "0192d5a0-0000-7000-8000-000000000010",
            "name": "Weekly retainer",
            "client_id": "0192d5a0-0000-7000-8000-000000000011",
            "contract_id": null,
            "amount": "120.00",
            "billing_cycle": "weekly",
            "status": "active",
            "start_date": "2026-01-01",
            "next_billing_date": null,
            "cancelled_date": null,
            "auto_renewal": true
        }"#;
        let subscription: Subscription = serde_json::from_str(raw).unwrap();
        assert_eq!(subscription.billing_cycle, None);
        assert_eq!(subscription.monthly_value(), Decimal::ZERO);
    }

    #[test]
    fn test_known_cycle_deserializes_case_insensitively() {
        let raw = r#"{
            "id": "0192d5a0-0000-7000-8000-000000000012",
            "name": "Hosting",
            "client_id": "0192d5a0-0000-7000-8000-000000000013",
            "contract_id": null,
            "amount": "360.00",
            "billing_cycle": "Quarterly",
            "status": "active",
            "start_date": "2026-01-01",
            "next_billing_date": null,
            "cancelled_date": null,
            "auto_renewal": false
        }"#;
        let subscription: Subscription = serde_json::from_str(raw).unwrap();
        assert_eq!(subscription.billing_cycle, Some(BillingCycle::Quarterly));
        assert_eq!(subscription.monthly_value(), Decimal::from(120u32));
    }

    #[test]
    fn test_cycle_round_trip() {
        for cycle in [
            BillingCycle::Monthly,
            BillingCycle::Quarterly,
            BillingCycle::Annual,
        ] {
            assert_eq!(BillingCycle::parse(cycle.as_str()), Some(cycle));
        }
        assert_eq!(BillingCycle::parse("yearly"), Some(BillingCycle::Annual));
        assert_eq!(BillingCycle::parse("weekly"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubscriptionStatus::Trial,
            SubscriptionStatus::Active,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Paused,
            SubscriptionStatus::Cancelled,
            SubscriptionStatus::Expired,
        ] {
            assert_eq!(SubscriptionStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_mrr_attribution() {
        assert!(SubscriptionStatus::Trial.attributes_mrr());
        assert!(SubscriptionStatus::Active.attributes_mrr());
        assert!(SubscriptionStatus::PastDue.attributes_mrr());
        assert!(!SubscriptionStatus::Paused.attributes_mrr());
        assert!(!SubscriptionStatus::Cancelled.attributes_mrr());
        assert!(!SubscriptionStatus::Expired.attributes_mrr());
    }
}
