//! Client (company) endpoints.

use serde::{Deserialize, Serialize};

use fathom_core::client::{Client, ClientStatus};
use fathom_core::contract::Contract;
use fathom_core::invoice::Invoice;
use fathom_core::subscription::Subscription;
use fathom_shared::types::{ClientId, ListQuery, Paginated, Pagination};
use fathom_shared::AppResult;

use crate::ApiClient;

/// Fields for creating or updating a client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientInput {
    /// Company name.
    pub name: String,
    /// Primary contact name.
    pub contact_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Client status.
    pub status: ClientStatus,
    /// Payment terms in days (net-N).
    pub payment_terms_days: u32,
}

#[derive(Debug, Deserialize)]
struct ClientListResponse {
    clients: Vec<Client>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct ClientContractsResponse {
    contracts: Vec<Contract>,
}

#[derive(Debug, Deserialize)]
struct ClientSubscriptionsResponse {
    subscriptions: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
struct ClientInvoicesResponse {
    invoices: Vec<Invoice>,
}

impl ApiClient {
    /// Lists clients with search, filter, sort, and pagination.
    pub async fn list_clients(&self, query: &ListQuery) -> AppResult<Paginated<Client>> {
        let response: ClientListResponse = self
            .get_json("/clients", &query.to_query_pairs())
            .await?;
        Ok(Paginated {
            items: response.clients,
            pagination: response.pagination,
        })
    }

    /// Fetches a single client.
    pub async fn get_client(&self, id: ClientId) -> AppResult<Client> {
        self.get_json(&format!("/clients/{id}"), &[]).await
    }

    /// Creates a client.
    pub async fn create_client(&self, input: &ClientInput) -> AppResult<Client> {
        self.post_json("/clients", input).await
    }

    /// Updates a client.
    pub async fn update_client(&self, id: ClientId, input: &ClientInput) -> AppResult<Client> {
        self.put_json(&format!("/clients/{id}"), input).await
    }

    /// Deletes a client.
    ///
    /// Deletion does not cascade: the client's contracts, subscriptions, and
    /// invoices survive with a dangling client reference.
    pub async fn delete_client(&self, id: ClientId) -> AppResult<()> {
        self.delete(&format!("/clients/{id}")).await
    }

    /// Lists a client's contracts.
    pub async fn client_contracts(&self, id: ClientId) -> AppResult<Vec<Contract>> {
        let response: ClientContractsResponse = self
            .get_json(&format!("/clients/{id}/contracts"), &[])
            .await?;
        Ok(response.contracts)
    }

    /// Lists a client's subscriptions.
    pub async fn client_subscriptions(&self, id: ClientId) -> AppResult<Vec<Subscription>> {
        let response: ClientSubscriptionsResponse = self
            .get_json(&format!("/clients/{id}/subscriptions"), &[])
            .await?;
        Ok(response.subscriptions)
    }

    /// Lists a client's invoices.
    pub async fn client_invoices(&self, id: ClientId) -> AppResult<Vec<Invoice>> {
        let response: ClientInvoicesResponse = self
            .get_json(&format!("/clients/{id}/invoices"), &[])
            .await?;
        Ok(response.invoices)
    }

    /// Fetches a client's revenue summary.
    ///
    /// Returned untyped; the dashboard owns the shape.
    pub async fn client_revenue(&self, id: ClientId) -> AppResult<serde_json::Value> {
        self.get_json(&format!("/clients/{id}/revenue"), &[]).await
    }
}
