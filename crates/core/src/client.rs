//! Client (company) entity.
//!
//! The client is the aggregate root for contracts, subscriptions, and
//! invoices. Deleting a client does not cascade: children keep a dangling
//! `ClientId` by explicit product decision, so references here are plain
//! typed IDs rather than enforced links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fathom_shared::types::ClientId;

/// Client status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Actively doing business.
    Active,
    /// Dormant but retained.
    Inactive,
    /// Not yet a customer.
    Prospect,
    /// Former customer that has left.
    Churned,
}

impl ClientStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Prospect => "prospect",
            Self::Churned => "churned",
        }
    }

    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "prospect" => Some(Self::Prospect),
            "churned" => Some(Self::Churned),
            _ => None,
        }
    }
}

/// A client company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Company name.
    pub name: String,
    /// Primary contact name.
    pub contact_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Client status.
    pub status: ClientStatus,
    /// Payment terms in days (net-N).
    pub payment_terms_days: u32,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ClientStatus::Active,
            ClientStatus::Inactive,
            ClientStatus::Prospect,
            ClientStatus::Churned,
        ] {
            assert_eq!(ClientStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_parse_unknown() {
        assert_eq!(ClientStatus::parse("deleted"), None);
    }
}
