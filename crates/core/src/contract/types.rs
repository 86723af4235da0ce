//! Contract domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use fathom_shared::types::{ClientId, ContractId};

/// Contract type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// Fixed-price engagement.
    Fixed,
    /// Ongoing retainer.
    Retainer,
    /// Billed by the hour.
    Hourly,
    /// Paid per milestone.
    Milestone,
}

impl ContractType {
    /// Returns the wire representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Retainer => "retainer",
            Self::Hourly => "hourly",
            Self::Milestone => "milestone",
        }
    }
}

/// Contract status in the lifecycle.
///
/// The valid transitions are:
/// - Draft → PendingSignature (sign)
/// - PendingSignature → Active (activate)
/// - Active → Completed (complete)
/// - Draft/PendingSignature/Active → Cancelled (cancel)
/// - Expired is server-derived when the end date passes while Active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Contract is being drafted.
    Draft,
    /// Awaiting countersignature.
    PendingSignature,
    /// In force.
    Active,
    /// Fulfilled and closed.
    Completed,
    /// Cancelled before completion.
    Cancelled,
    /// End date passed while still active (derived on read, terminal).
    Expired,
}

impl ContractStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingSignature => "pending_signature",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_signature" => Some(Self::PendingSignature),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Expired)
    }

    /// Returns true if field edits are still permitted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A contract as mirrored from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Contract ID.
    pub id: ContractId,
    /// Contract title.
    pub title: String,
    /// Owning client (required; may dangle after client deletion).
    pub client_id: ClientId,
    /// Contract type.
    pub contract_type: ContractType,
    /// Contract value, if fixed.
    pub value: Option<Decimal>,
    /// Start date.
    pub start_date: NaiveDate,
    /// Optional end date.
    pub end_date: Option<NaiveDate>,
    /// Current status.
    pub status: ContractStatus,
    /// Date the contract was signed.
    pub signed_date: Option<NaiveDate>,
    /// Whether the contract renews automatically.
    pub auto_renewal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ContractStatus::Draft,
            ContractStatus::PendingSignature,
            ContractStatus::Active,
            ContractStatus::Completed,
            ContractStatus::Cancelled,
            ContractStatus::Expired,
        ] {
            assert_eq!(ContractStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ContractStatus::parse("archived"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(ContractStatus::Completed.is_terminal());
        assert!(ContractStatus::Cancelled.is_terminal());
        assert!(ContractStatus::Expired.is_terminal());
        assert!(!ContractStatus::Active.is_terminal());
        assert!(!ContractStatus::Draft.is_terminal());
    }
}
