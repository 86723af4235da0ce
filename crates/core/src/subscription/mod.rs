//! Subscription billing engine: MRR/ARR normalization and status lifecycle.
//!
//! # Modules
//!
//! - `types` - Subscription domain types (BillingCycle, SubscriptionStatus)
//! - `error` - Subscription-specific error types
//! - `billing` - Billing-cycle normalization and MRR aggregation
//! - `lifecycle` - Status transition logic

pub mod billing;
pub mod error;
pub mod lifecycle;
pub mod types;

#[cfg(test)]
mod billing_props;

pub use billing::{annual_value, monthly_value, mrr, ChurnStats};
pub use error::SubscriptionError;
pub use lifecycle::SubscriptionLifecycle;
pub use types::{BillingCycle, Subscription, SubscriptionStatus};
