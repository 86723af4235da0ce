//! Client-side preflighting of an upload batch.
//!
//! Oversized and unsupported files are rejected with per-file messages, and
//! a selection beyond the 10-file cap is truncated with a warning naming how
//! many files were actually kept. Preflighting never fails the whole batch;
//! the caller decides what to do with an empty accepted set.

use serde::{Deserialize, Serialize};

/// Maximum number of files per import batch.
pub const MAX_FILES: usize = 10;

/// Maximum size of a single file, in bytes (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// File extensions the extraction service accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "csv", "xlsx", "xls"];

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    /// File name, including extension.
    pub file_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// A file rejected during preflight, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRejection {
    /// Name of the rejected file.
    pub file_name: String,
    /// Why it was rejected.
    pub message: String,
}

/// Result of preflighting a selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadPlan {
    /// Files that will be uploaded.
    pub accepted: Vec<UploadCandidate>,
    /// Files rejected with per-file messages.
    pub rejected: Vec<FileRejection>,
    /// Warning shown when the selection was truncated to the file cap.
    pub truncation_warning: Option<String>,
}

fn extension_of(file_name: &str) -> Option<String> {
    file_name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

fn is_allowed_type(file_name: &str) -> bool {
    extension_of(file_name).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Preflights a batch of selected files.
#[must_use]
pub fn preflight_files(files: &[UploadCandidate]) -> UploadPlan {
    let mut plan = UploadPlan::default();

    for file in files {
        if !is_allowed_type(&file.file_name) {
            plan.rejected.push(FileRejection {
                file_name: file.file_name.clone(),
                message: format!(
                    "{}: unsupported file type (allowed: {})",
                    file.file_name,
                    ALLOWED_EXTENSIONS.join(", ")
                ),
            });
            continue;
        }
        if file.size_bytes > MAX_FILE_SIZE_BYTES {
            plan.rejected.push(FileRejection {
                file_name: file.file_name.clone(),
                message: format!("{}: exceeds the 10 MB file size limit", file.file_name),
            });
            continue;
        }
        plan.accepted.push(file.clone());
    }

    if plan.accepted.len() > MAX_FILES {
        let selected = plan.accepted.len();
        plan.accepted.truncate(MAX_FILES);
        plan.truncation_warning = Some(format!(
            "Only the first {MAX_FILES} of {selected} files were kept"
        ));
    }

    plan
}
