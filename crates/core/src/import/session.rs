//! The bulk-import review session.
//!
//! The review set is pure client-side state between extract and confirm:
//! each row keeps a stable synthetic [`ImportRowId`] across edits, distinct
//! from any eventual persisted expense id. Rows that failed extraction are
//! force-excluded and can be neither included nor edited. Discarding the
//! session (back-to-upload) drops everything; a failed confirm leaves the
//! session intact for retry.

use fathom_shared::types::{ImportRowId, ImportSessionId};

use super::error::ImportError;
use super::types::{CandidateExpense, ConfirmResponse, ExtractionResult, ImportOutcome};

/// One row of the review table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    /// Stable synthetic row identifier.
    pub id: ImportRowId,
    /// The extraction result backing this row.
    pub result: ExtractionResult,
    /// Whether the row is excluded from confirm.
    pub excluded: bool,
}

impl ReviewRow {
    fn new(result: ExtractionResult) -> Self {
        // Failed rows start and stay excluded.
        let excluded = result.is_failed();
        Self {
            id: ImportRowId::new(),
            result,
            excluded,
        }
    }

    /// Returns true if this row failed extraction.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.result.is_failed()
    }

    /// Returns the candidate for an extracted row.
    #[must_use]
    pub fn candidate(&self) -> Option<&CandidateExpense> {
        match &self.result {
            ExtractionResult::Extracted { candidate, .. } => Some(candidate),
            ExtractionResult::Failed { .. } => None,
        }
    }
}

/// A live review session between extract and confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    /// Server-issued session id.
    pub session_id: ImportSessionId,
    rows: Vec<ReviewRow>,
}

impl ReviewSession {
    /// Builds the review set from the extraction response.
    ///
    /// Row order follows file order; failed rows are force-excluded.
    #[must_use]
    pub fn from_extraction(
        session_id: ImportSessionId,
        results: Vec<ExtractionResult>,
    ) -> Self {
        Self {
            session_id,
            rows: results.into_iter().map(ReviewRow::new).collect(),
        }
    }

    /// All rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    /// Guards against applying a response to a session that has been
    /// discarded client-side.
    pub fn ensure_session(&self, id: ImportSessionId) -> Result<(), ImportError> {
        if self.session_id == id {
            Ok(())
        } else {
            Err(ImportError::SessionMismatch {
                expected: self.session_id,
                got: id,
            })
        }
    }

    fn row_mut(&mut self, row_id: ImportRowId) -> Result<&mut ReviewRow, ImportError> {
        self.rows
            .iter_mut()
            .find(|row| row.id == row_id)
            .ok_or(ImportError::RowNotFound(row_id))
    }

    /// Includes or excludes a row from the confirm set.
    ///
    /// Failed rows cannot be included; excluding them again is a no-op.
    pub fn set_excluded(&mut self, row_id: ImportRowId, excluded: bool) -> Result<(), ImportError> {
        let row = self.row_mut(row_id)?;
        if row.is_failed() {
            if excluded {
                return Ok(());
            }
            return Err(ImportError::RowNotIncludable(row_id));
        }
        row.excluded = excluded;
        Ok(())
    }

    /// Returns the editable candidate for a row.
    pub fn candidate_mut(
        &mut self,
        row_id: ImportRowId,
    ) -> Result<&mut CandidateExpense, ImportError> {
        let row = self.row_mut(row_id)?;
        match &mut row.result {
            ExtractionResult::Extracted { candidate, .. } => Ok(candidate),
            ExtractionResult::Failed { .. } => Err(ImportError::RowNotEditable(row_id)),
        }
    }

    /// The candidates that will be submitted on confirm: non-excluded,
    /// non-failed rows, in display order.
    #[must_use]
    pub fn rows_to_submit(&self) -> Vec<&CandidateExpense> {
        self.rows
            .iter()
            .filter(|row| !row.excluded)
            .filter_map(ReviewRow::candidate)
            .collect()
    }

    /// Validates and classifies a confirm response.
    ///
    /// The response must come from this session and must account for every
    /// submitted row (`created + failed == submitted`).
    pub fn apply_outcome(
        &self,
        session_id: ImportSessionId,
        response: &ConfirmResponse,
    ) -> Result<ImportOutcome, ImportError> {
        self.ensure_session(session_id)?;

        let submitted = self.rows_to_submit().len();
        if submitted == 0 {
            return Err(ImportError::NothingToSubmit);
        }
        if response.created + response.failed != submitted {
            return Err(ImportError::CountMismatch {
                reported: response.created + response.failed,
                submitted,
            });
        }

        let outcome = if response.failed == 0 {
            ImportOutcome::AllCreated {
                created: response.created,
            }
        } else if response.created == 0 {
            ImportOutcome::AllFailed {
                failed: response.failed,
                errors: response.errors.clone(),
            }
        } else {
            ImportOutcome::PartiallyFailed {
                created: response.created,
                failed: response.failed,
                errors: response.errors.clone(),
            }
        };
        Ok(outcome)
    }
}
