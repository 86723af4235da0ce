//! Core business logic for Fathom.
//!
//! This crate contains pure business logic with ZERO web or I/O dependencies.
//! All domain types, lifecycle rules, and financial calculations live here.
//! Everything is a synchronous, deterministic function of its inputs; the
//! `fathom-client` crate owns all network traffic.
//!
//! # Modules
//!
//! - `client` - Client (company) entity and status
//! - `invoice` - Line-item totals, payment tracking, and the invoice lifecycle
//! - `contract` - Contract lifecycle state machine
//! - `subscription` - Billing-cycle normalization (MRR/ARR) and status transitions
//! - `receivables` - Accounts-receivable aging buckets
//! - `expense` - Expense records and tag normalization
//! - `import` - Bulk-expense-import reconciliation workflow

pub mod client;
pub mod contract;
pub mod expense;
pub mod import;
pub mod invoice;
pub mod receivables;
pub mod subscription;
