//! Accounts-receivable aging.
//!
//! # Modules
//!
//! - `aging` - Bucketing of unpaid invoice balances by days overdue

pub mod aging;

#[cfg(test)]
mod aging_props;

pub use aging::{AgeBucket, AgingReport, BucketTotal, ReceivablesAggregator};
