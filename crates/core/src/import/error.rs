//! Bulk-import error types.

use thiserror::Error;

use fathom_shared::types::{ImportRowId, ImportSessionId};

/// Errors that can occur during bulk-import reconciliation.
#[derive(Debug, Error)]
pub enum ImportError {
    /// No files were selected for upload.
    #[error("Select at least one file to import")]
    NoFilesSelected,

    /// Referenced review row does not exist.
    #[error("Import row {0} not found")]
    RowNotFound(ImportRowId),

    /// A failed row cannot be included in the confirm set.
    #[error("Row {0} failed extraction and cannot be included")]
    RowNotIncludable(ImportRowId),

    /// A failed row has no candidate to edit.
    #[error("Row {0} failed extraction and cannot be edited")]
    RowNotEditable(ImportRowId),

    /// Nothing is left to submit after exclusions.
    #[error("No rows selected for import")]
    NothingToSubmit,

    /// The confirm response does not account for every submitted row.
    #[error("Confirm response accounts for {reported} rows but {submitted} were submitted")]
    CountMismatch {
        /// `created + failed` as reported by the server.
        reported: usize,
        /// Number of rows actually submitted.
        submitted: usize,
    },

    /// A response arrived for a session that no longer exists client-side.
    #[error("Response for stale import session {got} (current: {expected})")]
    SessionMismatch {
        /// The live session.
        expected: ImportSessionId,
        /// The session the response belongs to.
        got: ImportSessionId,
    },
}

impl ImportError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoFilesSelected => "NO_FILES_SELECTED",
            Self::RowNotFound(_) => "ROW_NOT_FOUND",
            Self::RowNotIncludable(_) => "ROW_NOT_INCLUDABLE",
            Self::RowNotEditable(_) => "ROW_NOT_EDITABLE",
            Self::NothingToSubmit => "NOTHING_TO_SUBMIT",
            Self::CountMismatch { .. } => "COUNT_MISMATCH",
            Self::SessionMismatch { .. } => "SESSION_MISMATCH",
        }
    }
}

impl From<ImportError> for fathom_shared::AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::SessionMismatch { .. } | ImportError::CountMismatch { .. } => {
                Self::Conflict(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_includable_message() {
        let id = ImportRowId::new();
        let err = ImportError::RowNotIncludable(id);
        assert!(err.to_string().contains("cannot be included"));
        assert_eq!(err.error_code(), "ROW_NOT_INCLUDABLE");
    }
}
