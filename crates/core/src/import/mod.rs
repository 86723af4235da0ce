//! Bulk-expense-import reconciliation workflow.
//!
//! A four-stage, single-session workflow: upload → extract → review/edit →
//! confirm. The extraction engine is an opaque external service; this module
//! owns the client-side stages around it: upload preflight, the editable
//! review set, and confirm outcome classification.
//!
//! # Modules
//!
//! - `types` - Candidate rows, confidence labels, confirm wire types
//! - `error` - Import-specific error types
//! - `upload` - File preflighting (count/size/type limits)
//! - `session` - The review session and its confirm bookkeeping

pub mod error;
pub mod session;
pub mod types;
pub mod upload;

pub use error::ImportError;
pub use session::{ReviewRow, ReviewSession};
pub use types::{
    CandidateExpense, Confidence, ConfirmResponse, ExtractionResult, ImportOutcome, RowError,
};
pub use upload::{preflight_files, FileRejection, UploadCandidate, UploadPlan};
