//! Contract lifecycle state machine.
//!
//! # Modules
//!
//! - `types` - Contract domain types (ContractStatus, ContractType)
//! - `error` - Contract-specific error types
//! - `lifecycle` - State transition logic

pub mod error;
pub mod lifecycle;
pub mod types;

pub use error::ContractError;
pub use lifecycle::{ContractLifecycle, LifecycleAction};
pub use types::{Contract, ContractStatus, ContractType};
