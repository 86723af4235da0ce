//! Invoice domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use fathom_shared::types::money::{clamp_non_negative, parse_amount, parse_quantity};
use fathom_shared::types::{ClientId, InvoiceId, PaymentId};

/// Invoice status in the billing lifecycle.
///
/// The valid transitions are:
/// - Draft → Sent (explicit send action)
/// - Sent → Viewed (recipient read event) / Overdue (due date passed)
/// - Sent/Viewed/Overdue → Partial (payment leaves a balance) / Paid
/// - Partial → Paid / Overdue
/// - Cancelled is reachable from any non-paid, non-terminal state
/// - Void is a terminal override reachable from any state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted and can be freely edited.
    Draft,
    /// Invoice has been sent to the client.
    Sent,
    /// Recipient opened the invoice (set by the external read event).
    Viewed,
    /// Partially paid: some balance remains.
    Partial,
    /// Fully paid.
    Paid,
    /// Due date passed with a balance outstanding (derived, not user-set).
    Overdue,
    /// Cancelled before payment completed.
    Cancelled,
    /// Voided: terminal administrative override.
    Void,
}

impl InvoiceStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Viewed => "viewed",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
            Self::Void => "void",
        }
    }

    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "viewed" => Some(Self::Viewed),
            "partial" => Some(Self::Partial),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            "cancelled" => Some(Self::Cancelled),
            "void" => Some(Self::Void),
            _ => None,
        }
    }

    /// Returns true if manual status edits are permitted.
    ///
    /// Outside Draft, status only moves through payments, the send action,
    /// and server-derived events.
    #[must_use]
    pub fn is_manually_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns true if the invoice can still receive payments.
    #[must_use]
    pub fn accepts_payments(&self) -> bool {
        matches!(self, Self::Sent | Self::Viewed | Self::Partial | Self::Overdue)
    }

    /// Returns true if the transition from `self` to `to` is legal.
    ///
    /// This single table is consulted both to decide which actions to offer
    /// and to decide which to accept.
    #[must_use]
    pub fn can_transition(&self, to: Self) -> bool {
        if *self == to {
            return false;
        }
        match (*self, to) {
            // Void is a terminal override from anywhere.
            (from, Self::Void) if from != Self::Void => true,
            // Cancelled is reachable from any non-paid, non-terminal state.
            (from, Self::Cancelled) if !matches!(from, Self::Paid | Self::Void) => true,
            (Self::Draft, Self::Sent) => true,
            (Self::Sent, Self::Viewed | Self::Overdue | Self::Partial | Self::Paid) => true,
            (Self::Viewed, Self::Overdue | Self::Partial | Self::Paid) => true,
            (Self::Overdue, Self::Partial | Self::Paid) => true,
            (Self::Partial, Self::Paid | Self::Overdue) => true,
            _ => false,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method for a recorded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Paper check.
    Check,
    /// Bank/wire transfer.
    BankTransfer,
    /// Credit card.
    CreditCard,
    /// Anything else.
    #[default]
    Other,
}

impl PaymentMethod {
    /// Returns the wire representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::BankTransfer => "bank_transfer",
            Self::CreditCard => "credit_card",
            Self::Other => "other",
        }
    }

    /// Parses a method from its wire representation, defaulting to `Other`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cash" => Self::Cash,
            "check" => Self::Check,
            "bank_transfer" => Self::BankTransfer,
            "credit_card" => Self::CreditCard,
            _ => Self::Other,
        }
    }
}

/// A raw, possibly half-filled line-item row from a form.
///
/// Numeric fields are kept as strings so that partial input round-trips
/// without loss; coercion happens in [`LineItem::from_draft`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItemDraft {
    /// Item description.
    pub description: String,
    /// Raw quantity input.
    pub quantity: String,
    /// Raw unit price input.
    pub unit_price: String,
}

impl LineItemDraft {
    /// Returns true if every field of the row is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
            && self.quantity.trim().is_empty()
            && self.unit_price.trim().is_empty()
    }
}

/// A typed invoice line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,
    /// Quantity (non-negative).
    pub quantity: Decimal,
    /// Unit price (non-negative).
    pub unit_price: Decimal,
}

impl LineItem {
    /// Coerces a raw form row into a typed line item.
    ///
    /// Missing or non-numeric quantity/price degrade to zero so a
    /// partially-filled row never throws. Whether the row is submittable is
    /// decided separately by `InvoiceLedger::validate_line_items`.
    #[must_use]
    pub fn from_draft(draft: &LineItemDraft) -> Self {
        Self {
            description: draft.description.trim().to_string(),
            quantity: parse_quantity(&draft.quantity),
            unit_price: parse_amount(&draft.unit_price),
        }
    }

    /// Returns `quantity * unit_price`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Computed invoice totals.
///
/// `total_amount` reflects true arithmetic (it can go negative when the
/// discount exceeds subtotal plus tax, kept for audit); use
/// [`InvoiceTotals::display_total`] at presentation boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line totals, rounded to 2 decimals.
    pub subtotal: Decimal,
    /// Tax on the subtotal, rounded to 2 decimals.
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount - discount_amount`, rounded to 2 decimals.
    pub total_amount: Decimal,
}

impl InvoiceTotals {
    /// Returns the total clamped to zero for display.
    #[must_use]
    pub fn display_total(&self) -> Decimal {
        clamp_non_negative(self.total_amount)
    }
}

/// A payment recorded against an invoice.
///
/// Payments are append-only: once recorded they are never updated or
/// deleted, and the server-held list is authoritative after each
/// successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// The invoice this payment belongs to.
    pub invoice_id: InvoiceId,
    /// Payment amount.
    pub amount: Decimal,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// Optional reference number (check number, wire reference).
    pub reference_number: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// An invoice as mirrored from the server.
///
/// The computed fields (`totals`, `balance_due`) are server-authoritative;
/// the core recomputes them identically for display and for client-side
/// validation before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// System-assigned invoice number, immutable once created.
    pub invoice_number: String,
    /// Owning client.
    pub client_id: ClientId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Ordered line items (replace-on-update).
    pub line_items: Vec<LineItem>,
    /// Tax rate as a percentage (e.g. 10 for 10%).
    pub tax_rate: Decimal,
    /// Flat discount amount.
    pub discount_amount: Decimal,
    /// Current status.
    pub status: InvoiceStatus,
    /// Computed totals.
    pub totals: InvoiceTotals,
    /// Remaining balance due.
    pub balance_due: Decimal,
}
