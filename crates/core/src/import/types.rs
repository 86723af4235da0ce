//! Bulk-import domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The extraction engine's self-reported certainty for a candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// High certainty.
    High,
    /// Medium certainty.
    Medium,
    /// Low certainty; the row deserves a close look before confirming.
    Low,
}

impl Confidence {
    /// Returns the wire representation of the label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses a label from its wire representation, defaulting to `Low`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// A candidate expense extracted from one uploaded file.
///
/// Every field is independently editable during review; edits are pure
/// client-side state until confirm.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateExpense {
    /// Vendor name guess.
    pub vendor: String,
    /// Transaction date guess.
    pub transaction_date: Option<NaiveDate>,
    /// Amount guess.
    pub amount: Decimal,
    /// Category guess (free-form wire string).
    pub category: Option<String>,
    /// Payment method guess (free-form wire string).
    pub payment_method: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Per-file result from the extraction service.
///
/// Modeled as a tagged variant rather than one row shape with an error
/// field: a failed file has no candidate to edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ExtractionResult {
    /// The file yielded a candidate row.
    Extracted {
        /// The candidate expense.
        candidate: CandidateExpense,
        /// Extraction confidence.
        confidence: Confidence,
    },
    /// The file could not be extracted.
    Failed {
        /// Name of the file that failed.
        file_name: String,
        /// Extraction error message.
        message: String,
    },
}

impl ExtractionResult {
    /// Returns true if extraction failed for this file.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A per-row failure reported by the confirm call, keyed by vendor name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Vendor name of the failed row.
    pub vendor: String,
    /// Failure reason.
    pub message: String,
}

/// Wire response of the bulk-confirm call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    /// Number of expenses created.
    pub created: usize,
    /// Number of rows that failed.
    pub failed: usize,
    /// Per-row failure reasons.
    #[serde(default)]
    pub errors: Vec<RowError>,
}

/// Classified outcome of a confirm call.
///
/// Partial failure is a first-class outcome, not an exception: the UI
/// presents all-created, created-with-some-failed, and all-failed
/// distinctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Every submitted row was created.
    AllCreated {
        /// Number of expenses created.
        created: usize,
    },
    /// Some rows were created, some failed.
    PartiallyFailed {
        /// Number of expenses created.
        created: usize,
        /// Number of rows that failed.
        failed: usize,
        /// Per-row failure reasons.
        errors: Vec<RowError>,
    },
    /// Every submitted row failed.
    AllFailed {
        /// Number of rows that failed.
        failed: usize,
        /// Per-row failure reasons.
        errors: Vec<RowError>,
    },
}
