//! Shared types, errors, and configuration for Fathom.
//!
//! This crate provides common types used across all other crates:
//! - Money arithmetic with decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination and list-query types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
