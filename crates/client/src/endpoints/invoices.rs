//! Invoice endpoints, payment recording, and status actions.
//!
//! Payment recording is the one mutation serialized client-side: the
//! per-invoice lock plus a fresh refetch inside the critical section means
//! two concurrent payments validate against the second's true balance, not
//! a shared stale one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fathom_core::invoice::{
    Invoice, InvoiceLedger, InvoiceStatus, LineItemDraft, Payment, PaymentMethod,
};
use fathom_shared::types::{ClientId, InvoiceId, ListQuery, Paginated, Pagination};
use fathom_shared::AppResult;

use crate::ApiClient;

/// Fields for creating or updating a draft invoice.
///
/// Line items arrive as raw form rows; they are validated and coerced before
/// the request goes out, so a blank trailing row never reaches the server.
#[derive(Debug, Clone)]
pub struct InvoiceInput {
    /// Owning client.
    pub client_id: ClientId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Raw line-item rows.
    pub line_items: Vec<LineItemDraft>,
    /// Tax rate as a percentage.
    pub tax_rate: Decimal,
    /// Flat discount amount.
    pub discount_amount: Decimal,
}

/// Fields for recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Payment amount.
    pub amount: Decimal,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// Optional reference number (check number, wire reference).
    pub reference_number: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct InvoiceRequest {
    client_id: ClientId,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    line_items: Vec<fathom_core::invoice::LineItem>,
    tax_rate: Decimal,
    discount_amount: Decimal,
}

#[derive(Debug, Serialize)]
struct PaymentRequest<'a> {
    amount: Decimal,
    payment_date: NaiveDate,
    #[serde(rename = "paymentMethod")]
    payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct InvoiceListResponse {
    invoices: Vec<Invoice>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct PaymentListResponse {
    payments: Vec<Payment>,
}

#[derive(Debug, Serialize)]
struct StatusRequest {
    status: InvoiceStatus,
}

#[derive(Debug, Deserialize)]
struct OverdueResponse {
    invoices: Vec<Invoice>,
}

impl ApiClient {
    /// Lists invoices with search, filter, sort, and pagination.
    pub async fn list_invoices(&self, query: &ListQuery) -> AppResult<Paginated<Invoice>> {
        let response: InvoiceListResponse = self
            .get_json("/invoices", &query.to_query_pairs())
            .await?;
        Ok(Paginated {
            items: response.invoices,
            pagination: response.pagination,
        })
    }

    /// Fetches a single invoice with its computed totals and balance.
    pub async fn get_invoice(&self, id: InvoiceId) -> AppResult<Invoice> {
        self.get_json(&format!("/invoices/{id}"), &[]).await
    }

    /// Creates a draft invoice.
    ///
    /// The invoice number is assigned by the server and never set here.
    pub async fn create_invoice(&self, input: &InvoiceInput) -> AppResult<Invoice> {
        let body = Self::invoice_request(input)?;
        self.post_json("/invoices", &body).await
    }

    /// Updates a draft invoice. Line items are replaced wholesale.
    pub async fn update_invoice(
        &self,
        invoice: &Invoice,
        input: &InvoiceInput,
    ) -> AppResult<Invoice> {
        if !invoice.status.is_manually_editable() {
            return Err(
                fathom_core::invoice::InvoiceError::ManualEditNotAllowed(invoice.status).into(),
            );
        }
        let body = Self::invoice_request(input)?;
        self.put_json(&format!("/invoices/{}", invoice.id), &body)
            .await
    }

    /// Deletes an invoice.
    pub async fn delete_invoice(&self, id: InvoiceId) -> AppResult<()> {
        self.delete(&format!("/invoices/{id}")).await
    }

    /// Sends a draft invoice to the client.
    pub async fn send_invoice(&self, invoice: &Invoice) -> AppResult<Invoice> {
        InvoiceLedger::validate_manual_edit(invoice.status, InvoiceStatus::Sent)?;
        self.post_empty(&format!("/invoices/{}/send", invoice.id))
            .await
    }

    /// Cancels an invoice. Rejected once paid or void.
    pub async fn cancel_invoice(&self, invoice: &Invoice) -> AppResult<Invoice> {
        Self::ensure_transition(invoice.status, InvoiceStatus::Cancelled)?;
        self.put_json(
            &format!("/invoices/{}/status", invoice.id),
            &StatusRequest {
                status: InvoiceStatus::Cancelled,
            },
        )
        .await
    }

    /// Voids an invoice. Terminal administrative override.
    pub async fn void_invoice(&self, invoice: &Invoice) -> AppResult<Invoice> {
        Self::ensure_transition(invoice.status, InvoiceStatus::Void)?;
        self.put_json(
            &format!("/invoices/{}/status", invoice.id),
            &StatusRequest {
                status: InvoiceStatus::Void,
            },
        )
        .await
    }

    /// Lists the payments recorded against an invoice, oldest first.
    pub async fn list_payments(&self, invoice_id: InvoiceId) -> AppResult<Vec<Payment>> {
        let response: PaymentListResponse = self
            .get_json(&format!("/invoices/{invoice_id}/payments"), &[])
            .await?;
        Ok(response.payments)
    }

    /// Records a payment against an invoice.
    ///
    /// The invoice and its payments are refetched under the per-invoice lock
    /// so the validation runs against the balance the server will see. The
    /// returned invoice carries the server-updated balance and status.
    pub async fn record_payment(
        &self,
        invoice_id: InvoiceId,
        input: &PaymentInput,
    ) -> AppResult<Invoice> {
        let lock = self.payment_lock(invoice_id);
        let _guard = lock.lock().await;

        let invoice = self.get_invoice(invoice_id).await?;
        let payments = self.list_payments(invoice_id).await?;
        let outcome =
            InvoiceLedger::apply_payment(invoice.status, &invoice.totals, &payments, input.amount)?;
        tracing::debug!(
            invoice_id = %invoice_id,
            balance_after = %outcome.balance_due,
            new_status = ?outcome.new_status,
            "payment validated"
        );

        self.post_json(
            &format!("/invoices/{invoice_id}/payment"),
            &PaymentRequest {
                amount: input.amount,
                payment_date: input.payment_date,
                payment_method: input.method,
                reference_number: input.reference_number.as_deref(),
                notes: input.notes.as_deref(),
            },
        )
        .await
    }

    /// Manually edits a draft invoice's status.
    ///
    /// Outside draft, status only moves through the send action, payments,
    /// and server-derived events; manual edits are rejected locally.
    pub async fn update_invoice_status(
        &self,
        invoice: &Invoice,
        target: InvoiceStatus,
    ) -> AppResult<Invoice> {
        InvoiceLedger::validate_manual_edit(invoice.status, target)?;
        self.put_json(
            &format!("/invoices/{}/status", invoice.id),
            &StatusRequest { status: target },
        )
        .await
    }

    /// Sends a payment reminder for an invoice with a balance outstanding.
    pub async fn send_reminder(&self, invoice: &Invoice) -> AppResult<()> {
        if !invoice.status.accepts_payments() {
            return Err(fathom_core::invoice::InvoiceError::PaymentNotAccepted(
                invoice.status,
            )
            .into());
        }
        self.execute(|| {
            self.http
                .post(self.url(&format!("/invoices/{}/reminder", invoice.id)))
        })
        .await?;
        Ok(())
    }

    /// Fetches invoice statistics.
    ///
    /// Returned untyped; the dashboard owns the shape.
    pub async fn invoice_stats(&self) -> AppResult<serde_json::Value> {
        self.get_json("/invoices/stats", &[]).await
    }

    /// Lists invoices currently overdue.
    pub async fn overdue_invoices(&self) -> AppResult<Vec<Invoice>> {
        let response: OverdueResponse = self.get_json("/invoices/overdue", &[]).await?;
        Ok(response.invoices)
    }

    /// Downloads the rendered PDF for an invoice.
    pub async fn invoice_pdf(&self, id: InvoiceId) -> AppResult<bytes::Bytes> {
        self.get_bytes(&format!("/invoices/{id}/pdf")).await
    }

    fn invoice_request(input: &InvoiceInput) -> AppResult<InvoiceRequest> {
        let line_items = InvoiceLedger::validate_line_items(&input.line_items)?;
        Ok(InvoiceRequest {
            client_id: input.client_id,
            issue_date: input.issue_date,
            due_date: input.due_date,
            line_items,
            tax_rate: input.tax_rate,
            discount_amount: input.discount_amount,
        })
    }

    fn ensure_transition(from: InvoiceStatus, to: InvoiceStatus) -> AppResult<()> {
        if from.can_transition(to) {
            Ok(())
        } else {
            Err(fathom_core::invoice::InvoiceError::InvalidTransition { from, to }.into())
        }
    }
}
