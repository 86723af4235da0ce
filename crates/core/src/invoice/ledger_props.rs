//! Property-based tests for invoice ledger arithmetic.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fathom_shared::types::money::round_currency;
use fathom_shared::types::{InvoiceId, PaymentId};

use super::ledger::InvoiceLedger;
use super::types::{LineItem, Payment, PaymentMethod};

/// Strategy for non-negative currency amounts (0.00 to 100,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-negative quantities (0 to 1,000 in steps of 0.5).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..2_000i64).prop_map(|halves| Decimal::new(halves * 5, 1))
}

/// Strategy for tax rates (0.00% to 50.00%).
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..5_000i64).prop_map(|basis| Decimal::new(basis, 2))
}

fn line_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec((quantity(), amount()), 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (quantity, unit_price))| LineItem {
                description: format!("item {i}"),
                quantity,
                unit_price,
            })
            .collect()
    })
}

fn make_payment(amount: Decimal) -> Payment {
    Payment {
        id: PaymentId::new(),
        invoice_id: InvoiceId::new(),
        amount,
        payment_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        method: PaymentMethod::Other,
        reference_number: None,
        notes: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Subtotal always equals the sum of quantity * unit_price, rounded once.
    #[test]
    fn prop_subtotal_is_sum_of_line_totals(items in line_items(), rate in tax_rate()) {
        let totals = InvoiceLedger::compute_totals(&items, rate, Decimal::ZERO);
        let expected: Decimal = items.iter().map(LineItem::line_total).sum();
        prop_assert_eq!(totals.subtotal, round_currency(expected));
    }

    /// total == subtotal + subtotal*rate/100 - discount (within one rounding).
    #[test]
    fn prop_total_formula(items in line_items(), rate in tax_rate(), discount in amount()) {
        let totals = InvoiceLedger::compute_totals(&items, rate, discount);
        let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();
        let expected = round_currency(subtotal + subtotal * rate / Decimal::ONE_HUNDRED - discount);
        prop_assert_eq!(totals.total_amount, expected);
    }

    /// The displayed total is never negative.
    #[test]
    fn prop_display_total_non_negative(items in line_items(), rate in tax_rate(), discount in amount()) {
        let totals = InvoiceLedger::compute_totals(&items, rate, discount);
        prop_assert!(totals.display_total() >= Decimal::ZERO);
    }

    /// balance_due == max(0, total - sum(payments)) and is monotonically
    /// non-increasing as payments are appended.
    #[test]
    fn prop_balance_monotone_non_increasing(
        total in amount(),
        amounts in prop::collection::vec(amount(), 0..8),
    ) {
        let mut payments: Vec<Payment> = Vec::new();
        let mut previous = InvoiceLedger::balance_due(total, &payments);
        prop_assert_eq!(previous, round_currency(total.max(Decimal::ZERO)));

        for amount in amounts {
            payments.push(make_payment(amount));
            let current = InvoiceLedger::balance_due(total, &payments);
            prop_assert!(current <= previous);
            prop_assert!(current >= Decimal::ZERO);
            previous = current;
        }

        let paid: Decimal = payments.iter().map(|p| p.amount).sum();
        prop_assert_eq!(previous, round_currency((total - paid).max(Decimal::ZERO)));
    }

    /// A validated payment never overdraws: the resulting balance stays >= 0.
    #[test]
    fn prop_validated_payment_never_overdraws(balance in amount(), attempt in amount()) {
        match InvoiceLedger::validate_payment(attempt, balance) {
            Ok(()) => prop_assert!(balance - attempt >= Decimal::ZERO),
            Err(_) => prop_assert!(attempt <= Decimal::ZERO || attempt > balance),
        }
    }
}
