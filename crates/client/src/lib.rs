//! Authenticated HTTP client for the external Fathom finance API.
//!
//! The server is the source of truth for computed fields (totals, balances,
//! MRR): this crate validates locally with `fathom-core` before submitting,
//! never applies a mutation locally without a confirmed round trip, and
//! treats every fetched entity as possibly stale once another mutation is
//! observed to succeed.
//!
//! # Modules
//!
//! - `auth` - Owned token context with one transparent refresh-and-retry
//! - `http` - Request execution and error payload mapping
//! - `endpoints` - Per-resource API surfaces

pub mod auth;
pub mod endpoints;
pub mod http;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use fathom_shared::types::InvoiceId;
use fathom_shared::AppConfig;

use crate::auth::AuthContext;

/// Client for the external finance API.
///
/// Cheap to clone; clones share the HTTP pool, the auth context, and the
/// per-invoice payment locks.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    refresh_path: String,
    auth: AuthContext,
    /// One lock per invoice id: payment submission is serialized per invoice
    /// so two concurrent payments cannot both observe a stale balance.
    payment_locks: Arc<DashMap<InvoiceId, Arc<Mutex<()>>>>,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            refresh_path: config.auth.refresh_path.clone(),
            auth: AuthContext::new(),
            payment_locks: Arc::new(DashMap::new()),
        })
    }

    /// The auth context, for session init/teardown.
    #[must_use]
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Joins a path onto the base URL.
    #[must_use]
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Returns the payment submission lock for an invoice.
    pub(crate) fn payment_lock(&self, invoice_id: InvoiceId) -> Arc<Mutex<()>> {
        self.payment_locks
            .entry(invoice_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_shared::config::{ApiConfig, AuthConfig};

    fn config(base_url: &str) -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: base_url.to_string(),
                timeout_secs: 5,
            },
            auth: AuthConfig {
                refresh_path: "/auth/refresh".to_string(),
            },
        }
    }

    #[test]
    fn test_url_join_normalizes_slashes() {
        let client = ApiClient::new(&config("http://localhost:3000/api/")).unwrap();
        assert_eq!(
            client.url("/invoices/123"),
            "http://localhost:3000/api/invoices/123"
        );
        assert_eq!(client.url("clients"), "http://localhost:3000/api/clients");
    }

    #[test]
    fn test_payment_lock_is_shared_per_invoice() {
        let client = ApiClient::new(&config("http://localhost:3000/api")).unwrap();
        let id = InvoiceId::new();
        let a = client.payment_lock(id);
        let b = client.payment_lock(id);
        assert!(Arc::ptr_eq(&a, &b));
        let other = client.payment_lock(InvoiceId::new());
        assert!(!Arc::ptr_eq(&a, &other));
    }
}
