//! Invoice ledger: line-item totals, payment tracking, and lifecycle.
//!
//! # Modules
//!
//! - `types` - Invoice domain types (LineItem, Payment, InvoiceStatus)
//! - `error` - Invoice-specific error types
//! - `ledger` - Totals, balance-due, and payment application logic

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod ledger_props;

pub use error::InvoiceError;
pub use ledger::{InvoiceLedger, PaymentOutcome};
pub use types::{
    Invoice, InvoiceStatus, InvoiceTotals, LineItem, LineItemDraft, Payment, PaymentMethod,
};
