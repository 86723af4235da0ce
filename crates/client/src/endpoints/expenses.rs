//! Expense endpoints and the bulk-import workflow.
//!
//! Bulk import runs upload → extract → review → confirm. Everything between
//! extract and confirm is pure client-side state held in a
//! [`ReviewSession`]; only the confirm call creates expenses, and a failed
//! confirm leaves the session intact for retry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fathom_core::expense::{normalize_tags, Expense};
use fathom_core::import::{
    preflight_files, CandidateExpense, Confidence, ConfirmResponse, ExtractionResult,
    FileRejection, ImportError, ImportOutcome, ReviewSession, UploadCandidate,
};
use fathom_shared::types::{
    CategoryId, ExpenseId, ImportSessionId, ListQuery, Paginated, Pagination, PaymentMethodId,
};
use fathom_shared::AppResult;

use crate::ApiClient;

/// Fields for creating or updating an expense.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseInput {
    /// Expense amount.
    pub amount: Decimal,
    /// Date of the underlying transaction.
    pub transaction_date: NaiveDate,
    /// Vendor name.
    pub vendor: String,
    /// Expense category.
    pub category_id: Option<CategoryId>,
    /// Payment method used.
    pub payment_method_id: Option<PaymentMethodId>,
    /// Short description.
    pub description: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Raw tag inputs; normalized before the request goes out.
    pub tags: Vec<String>,
    /// Deductible for tax purposes.
    pub tax_deductible: bool,
    /// Reimbursable to an employee.
    pub reimbursable: bool,
    /// Billable to a client.
    pub billable: bool,
}

impl ExpenseInput {
    fn normalized(&self) -> Self {
        let mut input = self.clone();
        input.tags = normalize_tags(&input.tags);
        input
    }
}

/// An in-memory file selected for bulk import.
#[derive(Debug, Clone)]
pub struct ImportFile {
    /// File name, including extension.
    pub file_name: String,
    /// File contents.
    pub bytes: bytes::Bytes,
}

/// A started review session plus the preflight fallout.
#[derive(Debug)]
pub struct BulkImportStart {
    /// The review session backing the extracted rows.
    pub session: ReviewSession,
    /// Files rejected before upload, with per-file messages.
    pub rejected: Vec<FileRejection>,
    /// Warning shown when the selection was truncated to the file cap.
    pub truncation_warning: Option<String>,
}

/// One extracted row as it appears on the wire.
///
/// The extraction service reports failures inline via `error`; the core
/// models them as a distinct variant, so the conversion splits here.
#[derive(Debug, Deserialize)]
struct ExtractedRowDto {
    file_name: String,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    transaction_date: Option<NaiveDate>,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<ExtractedRowDto> for ExtractionResult {
    fn from(dto: ExtractedRowDto) -> Self {
        if let Some(message) = dto.error {
            return Self::Failed {
                file_name: dto.file_name,
                message,
            };
        }
        Self::Extracted {
            candidate: CandidateExpense {
                vendor: dto.vendor.unwrap_or_default(),
                transaction_date: dto.transaction_date,
                amount: dto.amount.unwrap_or_default(),
                category: dto.category,
                payment_method: dto.payment_method,
                description: dto.description,
                notes: dto.notes,
            },
            confidence: dto.confidence.as_deref().map_or(Confidence::Low, Confidence::parse),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractResponse {
    session_id: ImportSessionId,
    extracted_expenses: Vec<ExtractedRowDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmRequest<'a> {
    session_id: ImportSessionId,
    expenses: Vec<&'a CandidateExpense>,
}

#[derive(Debug, Deserialize)]
struct ExpenseListResponse {
    expenses: Vec<Expense>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VendorsResponse {
    vendors: Vec<String>,
}

impl ApiClient {
    /// Lists expenses with search, filter, sort, and pagination.
    pub async fn list_expenses(&self, query: &ListQuery) -> AppResult<Paginated<Expense>> {
        let response: ExpenseListResponse = self
            .get_json("/expenses", &query.to_query_pairs())
            .await?;
        Ok(Paginated {
            items: response.expenses,
            pagination: response.pagination,
        })
    }

    /// Fetches a single expense.
    pub async fn get_expense(&self, id: ExpenseId) -> AppResult<Expense> {
        self.get_json(&format!("/expenses/{id}"), &[]).await
    }

    /// Creates an expense. Tags are normalized before submission.
    pub async fn create_expense(&self, input: &ExpenseInput) -> AppResult<Expense> {
        self.post_json("/expenses", &input.normalized()).await
    }

    /// Updates an expense.
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        input: &ExpenseInput,
    ) -> AppResult<Expense> {
        self.put_json(&format!("/expenses/{id}"), &input.normalized())
            .await
    }

    /// Deletes an expense.
    pub async fn delete_expense(&self, id: ExpenseId) -> AppResult<()> {
        self.delete(&format!("/expenses/{id}")).await
    }

    /// Fetches expense statistics, optionally scoped to a period.
    ///
    /// Returned untyped; the dashboard owns the shape.
    pub async fn expense_stats(&self, period: Option<&str>) -> AppResult<serde_json::Value> {
        let query: Vec<(String, String)> = period
            .map(|p| vec![("period".to_string(), p.to_string())])
            .unwrap_or_default();
        self.get_json("/expenses/stats", &query).await
    }

    /// Lists all tags in use across expenses.
    pub async fn expense_tags(&self) -> AppResult<Vec<String>> {
        let response: TagsResponse = self.get_json("/expenses/tags", &[]).await?;
        Ok(response.tags)
    }

    /// Lists all known vendors.
    pub async fn expense_vendors(&self) -> AppResult<Vec<String>> {
        let response: VendorsResponse = self.get_json("/expenses/vendors", &[]).await?;
        Ok(response.vendors)
    }

    /// Uploads a batch of receipt files and starts a review session.
    ///
    /// Files failing preflight (type, size) are reported per-file and never
    /// uploaded; a selection beyond the batch cap is truncated with a
    /// warning. The whole call fails only when nothing survives preflight.
    pub async fn bulk_import(&self, files: &[ImportFile]) -> AppResult<BulkImportStart> {
        let candidates: Vec<UploadCandidate> = files
            .iter()
            .map(|f| UploadCandidate {
                file_name: f.file_name.clone(),
                size_bytes: f.bytes.len() as u64,
            })
            .collect();
        let plan = preflight_files(&candidates);
        if plan.accepted.is_empty() {
            return Err(ImportError::NoFilesSelected.into());
        }

        let uploads: Vec<&ImportFile> = plan
            .accepted
            .iter()
            .filter_map(|accepted| files.iter().find(|f| f.file_name == accepted.file_name))
            .collect();

        tracing::info!(
            accepted = uploads.len(),
            rejected = plan.rejected.len(),
            "starting bulk import"
        );

        let response: ExtractResponse = self
            .post_multipart("/expenses/bulk-import", || {
                let mut form = reqwest::multipart::Form::new();
                for file in &uploads {
                    let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
                        .file_name(file.file_name.clone());
                    form = form.part("files", part);
                }
                form
            })
            .await?;

        let results: Vec<ExtractionResult> = response
            .extracted_expenses
            .into_iter()
            .map(Into::into)
            .collect();
        for result in &results {
            if let ExtractionResult::Extracted {
                candidate,
                confidence,
            } = result
            {
                tracing::debug!(
                    vendor = %candidate.vendor,
                    confidence = confidence.as_str(),
                    "extracted row"
                );
            }
        }
        Ok(BulkImportStart {
            session: ReviewSession::from_extraction(response.session_id, results),
            rejected: plan.rejected,
            truncation_warning: plan.truncation_warning,
        })
    }

    /// Refetches the extraction results for a session.
    ///
    /// Rebuilds the review set from scratch, so any local edits and
    /// exclusions are discarded along with the old row ids.
    pub async fn bulk_import_session(
        &self,
        session_id: ImportSessionId,
    ) -> AppResult<ReviewSession> {
        let response: ExtractResponse = self
            .get_json(&format!("/expenses/bulk-import/{session_id}"), &[])
            .await?;
        let results = response
            .extracted_expenses
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(ReviewSession::from_extraction(response.session_id, results))
    }

    /// Confirms the non-excluded rows of a review session.
    ///
    /// Partial failure is a first-class outcome: rows that fail server-side
    /// are reported with reasons while the rest are created.
    pub async fn bulk_confirm(&self, session: &ReviewSession) -> AppResult<ImportOutcome> {
        let expenses = session.rows_to_submit();
        if expenses.is_empty() {
            return Err(ImportError::NothingToSubmit.into());
        }

        let response: ConfirmResponse = self
            .post_json(
                "/expenses/bulk-confirm",
                &ConfirmRequest {
                    session_id: session.session_id,
                    expenses,
                },
            )
            .await?;

        let outcome = session.apply_outcome(session.session_id, &response)?;
        tracing::info!(session_id = %session.session_id, ?outcome, "bulk import confirmed");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dto_with_error_becomes_failed() {
        let dto = ExtractedRowDto {
            file_name: "receipt.pdf".to_string(),
            vendor: None,
            transaction_date: None,
            amount: None,
            category: None,
            payment_method: None,
            description: None,
            notes: None,
            confidence: None,
            error: Some("unreadable scan".to_string()),
        };
        let result: ExtractionResult = dto.into();
        assert!(matches!(
            result,
            ExtractionResult::Failed { ref file_name, .. } if file_name == "receipt.pdf"
        ));
    }

    #[test]
    fn test_dto_without_error_becomes_candidate() {
        let dto = ExtractedRowDto {
            file_name: "receipt.pdf".to_string(),
            vendor: Some("Staples".to_string()),
            transaction_date: NaiveDate::from_ymd_opt(2026, 4, 2),
            amount: Some(dec!(43.10)),
            category: Some("office".to_string()),
            payment_method: None,
            description: None,
            notes: None,
            confidence: Some("medium".to_string()),
            error: None,
        };
        let result: ExtractionResult = dto.into();
        let ExtractionResult::Extracted {
            candidate,
            confidence,
        } = result
        else {
            panic!("expected extracted row");
        };
        assert_eq!(candidate.vendor, "Staples");
        assert_eq!(candidate.amount, dec!(43.10));
        assert_eq!(confidence, Confidence::Medium);
    }

    #[test]
    fn test_dto_missing_confidence_defaults_low() {
        let dto = ExtractedRowDto {
            file_name: "scan.jpg".to_string(),
            vendor: Some("Cafe".to_string()),
            transaction_date: None,
            amount: Some(dec!(9.50)),
            category: None,
            payment_method: None,
            description: None,
            notes: None,
            confidence: None,
            error: None,
        };
        let ExtractionResult::Extracted { confidence, .. } = dto.into() else {
            panic!("expected extracted row");
        };
        assert_eq!(confidence, Confidence::Low);
    }

    #[test]
    fn test_extract_response_reads_camel_case_keys() {
        let raw = r#"{
            "sessionId": "0192d5a0-0000-7000-8000-000000000001",
            "extractedExpenses": [
                {"file_name": "receipt.pdf", "vendor": "Cafe", "amount": "9.50", "confidence": "high"}
            ]
        }"#;
        let response: ExtractResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.extracted_expenses.len(), 1);
    }

    #[test]
    fn test_confirm_request_sends_camel_case_session_key() {
        let candidate = CandidateExpense {
            vendor: "Staples".to_string(),
            ..CandidateExpense::default()
        };
        let request = ConfirmRequest {
            session_id: ImportSessionId::new(),
            expenses: vec![&candidate],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("sessionId").is_some());
        assert!(json.get("session_id").is_none());
        assert_eq!(json["expenses"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_expense_input_normalizes_tags() {
        let input = ExpenseInput {
            amount: dec!(12.00),
            transaction_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            vendor: "Cafe".to_string(),
            category_id: None,
            payment_method_id: None,
            description: None,
            notes: None,
            tags: vec!["  Meals ".to_string(), "TRAVEL".to_string(), "meals".to_string()],
            tax_deductible: true,
            reimbursable: false,
            billable: false,
        };
        assert_eq!(input.normalized().tags, vec!["meals", "travel"]);
    }
}
