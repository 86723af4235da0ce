//! File attachment endpoints.
//!
//! Attachments hang off an owning entity (expense, contract, invoice) and
//! are addressed by entity type plus entity id on the wire.

use serde::Deserialize;
use uuid::Uuid;

use fathom_shared::types::{AttachmentId, ContractId, ExpenseId, InvoiceId};
use fathom_shared::AppResult;

use crate::ApiClient;

/// The entity an attachment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOwner {
    /// An expense (receipts, statements).
    Expense(ExpenseId),
    /// A contract (signed documents).
    Contract(ContractId),
    /// An invoice (supporting documents).
    Invoice(InvoiceId),
}

impl AttachmentOwner {
    /// Wire name of the entity type.
    #[must_use]
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::Expense(_) => "expense",
            Self::Contract(_) => "contract",
            Self::Invoice(_) => "invoice",
        }
    }

    /// The owning entity's id.
    #[must_use]
    pub fn entity_id(&self) -> Uuid {
        match self {
            Self::Expense(id) => id.into_inner(),
            Self::Contract(id) => id.into_inner(),
            Self::Invoice(id) => id.into_inner(),
        }
    }
}

/// Metadata for a stored attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: AttachmentId,
    /// Original file name.
    pub file_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// MIME type as reported on upload.
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttachmentListResponse {
    attachments: Vec<Attachment>,
}

#[derive(Debug, Deserialize)]
struct DownloadLink {
    url: String,
}

impl ApiClient {
    /// Lists the attachments on an entity.
    pub async fn list_attachments(&self, owner: AttachmentOwner) -> AppResult<Vec<Attachment>> {
        let response: AttachmentListResponse = self
            .get_json(
                &format!("/attachments/{}/{}", owner.entity_type(), owner.entity_id()),
                &[],
            )
            .await?;
        Ok(response.attachments)
    }

    /// Uploads an attachment to an entity.
    pub async fn upload_attachment(
        &self,
        owner: AttachmentOwner,
        file_name: &str,
        contents: bytes::Bytes,
    ) -> AppResult<Attachment> {
        let name = file_name.to_string();
        self.post_multipart("/attachments/upload", || {
            let part = reqwest::multipart::Part::bytes(contents.to_vec())
                .file_name(name.clone());
            reqwest::multipart::Form::new()
                .text("entityType", owner.entity_type())
                .text("entityId", owner.entity_id().to_string())
                .part("files", part)
        })
        .await
    }

    /// Fetches a short-lived signed URL for an attachment's contents.
    pub async fn download_attachment(&self, id: AttachmentId) -> AppResult<String> {
        let link: DownloadLink = self
            .get_json(&format!("/attachments/{id}/download"), &[])
            .await?;
        Ok(link.url)
    }

    /// Deletes an attachment.
    pub async fn delete_attachment(&self, id: AttachmentId) -> AppResult<()> {
        self.delete(&format!("/attachments/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_wire_names() {
        let expense = AttachmentOwner::Expense(ExpenseId::new());
        assert_eq!(expense.entity_type(), "expense");
        let contract = AttachmentOwner::Contract(ContractId::new());
        assert_eq!(contract.entity_type(), "contract");
    }

    #[test]
    fn test_download_link_payload() {
        let raw = r#"{"url": "https://files.example.com/signed/abc123?expires=300"}"#;
        let link: DownloadLink = serde_json::from_str(raw).unwrap();
        assert!(link.url.starts_with("https://"));
    }

    #[test]
    fn test_attachment_wire_shape_tolerates_missing_content_type() {
        let raw = r#"{
            "id": "0192d5a0-0000-7000-8000-000000000002",
            "file_name": "receipt.pdf",
            "size_bytes": 48211
        }"#;
        let attachment: Attachment = serde_json::from_str(raw).unwrap();
        assert_eq!(attachment.file_name, "receipt.pdf");
        assert!(attachment.content_type.is_none());
    }
}
