//! Fathom API smoke check.
//!
//! Walks the read-only endpoints of the configured finance API and logs
//! what it finds. Useful for verifying credentials and connectivity without
//! touching any data.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fathom_client::auth::TokenPair;
use fathom_client::ApiClient;
use fathom_core::receivables::AgeBucket;
use fathom_shared::types::ListQuery;
use fathom_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fathom=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let client = ApiClient::new(&config)?;
    info!(base_url = %config.api.base_url, "configured");

    if let (Ok(access_token), Ok(refresh_token)) = (
        std::env::var("FATHOM_ACCESS_TOKEN"),
        std::env::var("FATHOM_REFRESH_TOKEN"),
    ) {
        client
            .auth()
            .install(TokenPair {
                access_token,
                refresh_token,
            })
            .await;
        info!("session installed from environment");
    }

    let clients = client.list_clients(&ListQuery::page(1)).await?;
    info!(total = clients.pagination.total_items, "clients reachable");

    let revenue = client.recurring_revenue().await?;
    info!(mrr = %revenue.mrr, arr = %revenue.arr, "recurring revenue");

    let aging = client.receivables_aging().await?;
    info!(
        outstanding = %aging.total,
        invoices = aging.invoice_count(),
        "receivables aging"
    );
    for bucket in AgeBucket::all() {
        let totals = aging.bucket(bucket);
        info!(
            days = bucket.label(),
            total = %totals.total,
            count = totals.count,
            "aging bucket"
        );
    }

    let overdue = client.overdue_invoices().await?;
    info!(count = overdue.len(), "overdue invoices");

    Ok(())
}
