//! Invoice ledger calculations and payment application.
//!
//! All functions here are pure: the server remains the source of truth for
//! stored totals, and these recompute the same figures for display and for
//! client-side validation before submission.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fathom_shared::types::money::{clamp_non_negative, percent_of, round_currency};

use super::error::InvoiceError;
use super::types::{InvoiceStatus, InvoiceTotals, LineItem, LineItemDraft, Payment};

/// Result of applying a payment to an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Balance due after the payment.
    pub balance_due: Decimal,
    /// Status the invoice moves to, if the payment changes it.
    pub new_status: Option<InvoiceStatus>,
}

/// Stateless service for invoice totals, balance tracking, and payment rules.
pub struct InvoiceLedger;

impl InvoiceLedger {
    /// Computes subtotal, tax, and total from line items.
    ///
    /// Line totals stay unrounded through the summation; each final figure is
    /// rounded to 2 decimals at this boundary. The total keeps true
    /// arithmetic (it may be negative when the discount exceeds the rest).
    #[must_use]
    pub fn compute_totals(
        line_items: &[LineItem],
        tax_rate: Decimal,
        discount_amount: Decimal,
    ) -> InvoiceTotals {
        let subtotal: Decimal = line_items.iter().map(LineItem::line_total).sum();
        let tax_amount = percent_of(subtotal, tax_rate);
        let total_amount = subtotal + tax_amount - discount_amount;

        InvoiceTotals {
            subtotal: round_currency(subtotal),
            tax_amount: round_currency(tax_amount),
            total_amount: round_currency(total_amount),
        }
    }

    /// Computes the balance due: `max(0, total - Σ payments)`, rounded.
    #[must_use]
    pub fn balance_due(total_amount: Decimal, payments: &[Payment]) -> Decimal {
        let paid: Decimal = payments.iter().map(|p| p.amount).sum();
        round_currency(clamp_non_negative(total_amount - paid))
    }

    /// Validates and coerces a set of raw line-item rows for submission.
    ///
    /// Entirely blank rows are dropped. A row with any content but a missing
    /// description blocks submission with `DescriptionRequired`.
    pub fn validate_line_items(
        drafts: &[LineItemDraft],
    ) -> Result<Vec<LineItem>, InvoiceError> {
        let mut items = Vec::with_capacity(drafts.len());
        for (row, draft) in drafts.iter().enumerate() {
            if draft.is_blank() {
                continue;
            }
            if draft.description.trim().is_empty() {
                return Err(InvoiceError::DescriptionRequired { row });
            }
            items.push(LineItem::from_draft(draft));
        }
        Ok(items)
    }

    /// Validates a payment amount against the current balance due.
    ///
    /// An over-balance amount is a validation error at entry time, never
    /// silently clamped.
    pub fn validate_payment(amount: Decimal, balance_due: Decimal) -> Result<(), InvoiceError> {
        if amount <= Decimal::ZERO {
            return Err(InvoiceError::NonPositivePayment);
        }
        if amount > balance_due {
            return Err(InvoiceError::PaymentExceedsBalance {
                amount,
                balance: balance_due,
            });
        }
        Ok(())
    }

    /// Applies a payment, returning the new balance and any status change.
    ///
    /// Recording a payment is the sole path that moves status forward from
    /// sent/viewed/overdue: to `Partial` while a balance remains, to `Paid`
    /// when the balance reaches zero.
    pub fn apply_payment(
        status: InvoiceStatus,
        totals: &InvoiceTotals,
        payments: &[Payment],
        amount: Decimal,
    ) -> Result<PaymentOutcome, InvoiceError> {
        if !status.accepts_payments() {
            return Err(InvoiceError::PaymentNotAccepted(status));
        }

        let balance_before = Self::balance_due(totals.total_amount, payments);
        Self::validate_payment(amount, balance_before)?;

        let balance_after = round_currency(clamp_non_negative(balance_before - amount));
        let new_status = Self::status_after_payment(totals, balance_after)
            .filter(|next| *next != status && status.can_transition(*next));

        Ok(PaymentOutcome {
            balance_due: balance_after,
            new_status,
        })
    }

    /// Derives the status a payment moves an invoice to, if any.
    #[must_use]
    pub fn status_after_payment(
        totals: &InvoiceTotals,
        balance_due: Decimal,
    ) -> Option<InvoiceStatus> {
        if balance_due.is_zero() {
            Some(InvoiceStatus::Paid)
        } else if balance_due < totals.display_total() {
            Some(InvoiceStatus::Partial)
        } else {
            None
        }
    }

    /// Derives the effective status for display, folding in overdue.
    ///
    /// Overdue is a derived state, not a user action: an unpaid invoice past
    /// its due date reads as overdue. Missing due dates never read overdue.
    #[must_use]
    pub fn effective_status(
        status: InvoiceStatus,
        due_date: Option<NaiveDate>,
        balance_due: Decimal,
        today: NaiveDate,
    ) -> InvoiceStatus {
        match (status, due_date) {
            (InvoiceStatus::Sent | InvoiceStatus::Viewed | InvoiceStatus::Partial, Some(due))
                if due < today && balance_due > Decimal::ZERO =>
            {
                InvoiceStatus::Overdue
            }
            _ => status,
        }
    }

    /// Validates a manual status edit.
    ///
    /// Manual edits are permitted only while the invoice is a draft, and
    /// only along legal transitions.
    pub fn validate_manual_edit(
        current: InvoiceStatus,
        target: InvoiceStatus,
    ) -> Result<(), InvoiceError> {
        if !current.is_manually_editable() {
            return Err(InvoiceError::ManualEditNotAllowed(current));
        }
        if !current.can_transition(target) {
            return Err(InvoiceError::InvalidTransition {
                from: current,
                to: target,
            });
        }
        Ok(())
    }
}
