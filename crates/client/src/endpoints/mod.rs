//! Per-resource API surfaces.
//!
//! Each module wraps one resource family: local validation runs against the
//! pure domain rules first, the request goes out only when it passes, and
//! nothing is treated as applied until the server confirms it.

pub mod attachments;
pub mod clients;
pub mod contracts;
pub mod expenses;
pub mod invoices;
pub mod revenue;
pub mod subscriptions;
