//! Aging buckets for unpaid invoice balances.
//!
//! Every invoice with a positive balance and a status outside
//! cancelled/void lands in exactly one bucket; per-bucket totals and the
//! grand total reconcile exactly. A missing due date buckets as current
//! rather than being dropped.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use fathom_shared::types::ClientId;

use crate::invoice::{Invoice, InvoiceStatus};

/// Age bucket by days overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    /// 0-30 days overdue (includes not-yet-due and missing due dates).
    Current,
    /// 31-60 days overdue.
    ThirtyOneToSixty,
    /// More than 60 days overdue.
    OverSixty,
}

impl AgeBucket {
    /// Classifies a days-overdue figure into its bucket.
    #[must_use]
    pub fn for_days_overdue(days: i64) -> Self {
        match days {
            _ if days > 60 => Self::OverSixty,
            _ if days > 30 => Self::ThirtyOneToSixty,
            _ => Self::Current,
        }
    }

    /// Returns the display label for the bucket.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "0-30",
            Self::ThirtyOneToSixty => "31-60",
            Self::OverSixty => "60+",
        }
    }

    /// All buckets in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Current, Self::ThirtyOneToSixty, Self::OverSixty]
    }
}

/// Total and count for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketTotal {
    /// Sum of balances in the bucket.
    pub total: Decimal,
    /// Number of invoices in the bucket.
    pub count: usize,
}

/// Aging report: per-bucket totals plus the reconciling grand total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgingReport {
    /// 0-30 days.
    pub current: BucketTotal,
    /// 31-60 days.
    pub thirty_one_to_sixty: BucketTotal,
    /// 60+ days.
    pub over_sixty: BucketTotal,
    /// Sum of balances across all buckets.
    pub total: Decimal,
}

impl AgingReport {
    fn add(&mut self, bucket: AgeBucket, balance: Decimal) {
        let slot = match bucket {
            AgeBucket::Current => &mut self.current,
            AgeBucket::ThirtyOneToSixty => &mut self.thirty_one_to_sixty,
            AgeBucket::OverSixty => &mut self.over_sixty,
        };
        slot.total += balance;
        slot.count += 1;
        self.total += balance;
    }

    /// Number of invoices across all buckets.
    #[must_use]
    pub fn invoice_count(&self) -> usize {
        self.current.count + self.thirty_one_to_sixty.count + self.over_sixty.count
    }

    /// The totals for one bucket.
    #[must_use]
    pub fn bucket(&self, bucket: AgeBucket) -> BucketTotal {
        match bucket {
            AgeBucket::Current => self.current,
            AgeBucket::ThirtyOneToSixty => self.thirty_one_to_sixty,
            AgeBucket::OverSixty => self.over_sixty,
        }
    }
}

/// Stateless service that buckets unpaid balances by age.
pub struct ReceivablesAggregator;

impl ReceivablesAggregator {
    /// Returns true if an invoice counts toward receivables.
    #[must_use]
    pub fn includes(invoice: &Invoice) -> bool {
        invoice.balance_due > Decimal::ZERO
            && !matches!(
                invoice.status,
                InvoiceStatus::Cancelled | InvoiceStatus::Void
            )
    }

    /// Days overdue for an invoice as of `today`.
    ///
    /// Never negative; a missing due date counts as zero.
    #[must_use]
    pub fn days_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
        due_date.map_or(0, |due| (today - due).num_days().max(0))
    }

    /// Buckets an invoice by age.
    #[must_use]
    pub fn bucket_for(invoice: &Invoice, today: NaiveDate) -> AgeBucket {
        AgeBucket::for_days_overdue(Self::days_overdue(invoice.due_date, today))
    }

    /// Builds the system-wide aging report.
    #[must_use]
    pub fn aging(invoices: &[Invoice], today: NaiveDate) -> AgingReport {
        let mut report = AgingReport::default();
        for invoice in invoices.iter().filter(|inv| Self::includes(inv)) {
            report.add(Self::bucket_for(invoice, today), invoice.balance_due);
        }
        report
    }

    /// Builds per-client aging reports.
    #[must_use]
    pub fn aging_by_client(
        invoices: &[Invoice],
        today: NaiveDate,
    ) -> HashMap<ClientId, AgingReport> {
        let mut reports: HashMap<ClientId, AgingReport> = HashMap::new();
        for invoice in invoices.iter().filter(|inv| Self::includes(inv)) {
            reports
                .entry(invoice.client_id)
                .or_default()
                .add(Self::bucket_for(invoice, today), invoice.balance_due);
        }
        reports
    }
}
