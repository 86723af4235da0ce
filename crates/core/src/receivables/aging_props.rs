//! Property-based tests for receivables aging.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fathom_shared::types::{ClientId, InvoiceId};

use super::aging::{AgeBucket, ReceivablesAggregator};
use crate::invoice::{Invoice, InvoiceStatus, InvoiceTotals};

fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn status() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Sent),
        Just(InvoiceStatus::Viewed),
        Just(InvoiceStatus::Partial),
        Just(InvoiceStatus::Overdue),
        Just(InvoiceStatus::Paid),
        Just(InvoiceStatus::Cancelled),
        Just(InvoiceStatus::Void),
    ]
}

fn due_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![
        Just(None),
        (0i64..200i64).prop_map(|days_ago| {
            NaiveDate::from_ymd_opt(2026, 6, 30)
                .map(|today| today - chrono::Duration::days(days_ago))
        }),
    ]
}

fn invoices() -> impl Strategy<Value = Vec<Invoice>> {
    prop::collection::vec((balance(), status(), due_date()), 0..30).prop_map(|rows| {
        rows.into_iter()
            .map(|(balance_due, status, due_date)| Invoice {
                id: InvoiceId::new(),
                invoice_number: "INV".to_string(),
                client_id: ClientId::new(),
                issue_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                due_date,
                line_items: vec![],
                tax_rate: Decimal::ZERO,
                discount_amount: Decimal::ZERO,
                status,
                totals: InvoiceTotals {
                    subtotal: balance_due,
                    tax_amount: Decimal::ZERO,
                    total_amount: balance_due,
                },
                balance_due,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every included invoice lands in exactly one bucket, and the bucket
    /// totals reconcile with the grand total: nothing double-counted,
    /// nothing dropped.
    #[test]
    fn prop_buckets_partition_and_reconcile(invoices in invoices()) {
        let today = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let report = ReceivablesAggregator::aging(&invoices, today);

        let included: Vec<_> = invoices
            .iter()
            .filter(|inv| ReceivablesAggregator::includes(inv))
            .collect();

        prop_assert_eq!(report.invoice_count(), included.len());

        let expected_total: Decimal = included.iter().map(|inv| inv.balance_due).sum();
        prop_assert_eq!(report.total, expected_total);
        prop_assert_eq!(
            report.total,
            report.current.total + report.thirty_one_to_sixty.total + report.over_sixty.total
        );
    }

    /// Per-client reports sum to the system-wide report.
    #[test]
    fn prop_by_client_sums_to_global(invoices in invoices()) {
        let today = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let global = ReceivablesAggregator::aging(&invoices, today);
        let by_client = ReceivablesAggregator::aging_by_client(&invoices, today);

        let client_total: Decimal = by_client.values().map(|r| r.total).sum();
        let client_count: usize = by_client.values().map(super::aging::AgingReport::invoice_count).sum();
        prop_assert_eq!(client_total, global.total);
        prop_assert_eq!(client_count, global.invoice_count());
    }

    /// Bucket classification covers every non-negative day count.
    #[test]
    fn prop_every_age_has_a_bucket(days in 0i64..10_000) {
        let bucket = AgeBucket::for_days_overdue(days);
        match bucket {
            AgeBucket::Current => prop_assert!(days <= 30),
            AgeBucket::ThirtyOneToSixty => prop_assert!(days > 30 && days <= 60),
            AgeBucket::OverSixty => prop_assert!(days > 60),
        }
    }
}
