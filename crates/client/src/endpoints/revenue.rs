//! Revenue analytics endpoints.
//!
//! All figures here are server-computed aggregates; the core's own MRR and
//! aging math exists to validate and display locally, never to overwrite
//! these. Chart payloads stay untyped: their shape is owned by the charting
//! layer and changes independently of this client.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use fathom_core::receivables::AgingReport;
use fathom_shared::AppResult;

use crate::ApiClient;

fn period_query(period: Option<&str>) -> Vec<(String, String)> {
    period
        .map(|p| vec![("period".to_string(), p.to_string())])
        .unwrap_or_default()
}

fn date_range_query(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(from) = date_from {
        pairs.push(("dateFrom".to_string(), from.to_string()));
    }
    if let Some(to) = date_to {
        pairs.push(("dateTo".to_string(), to.to_string()));
    }
    pairs
}

/// Recurring-revenue summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecurringRevenue {
    /// Monthly recurring revenue.
    pub mrr: Decimal,
    /// Annual recurring revenue (12 x MRR).
    pub arr: Decimal,
    /// Number of subscriptions contributing.
    pub active_subscriptions: u64,
}

impl ApiClient {
    /// Fetches the MRR summary.
    pub async fn recurring_revenue(&self) -> AppResult<RecurringRevenue> {
        self.get_json("/revenue/mrr", &[]).await
    }

    /// Fetches the ARR summary.
    pub async fn annual_recurring_revenue(&self) -> AppResult<RecurringRevenue> {
        self.get_json("/revenue/arr", &[]).await
    }

    /// Fetches the accounts-receivable aging report.
    pub async fn receivables_aging(&self) -> AppResult<AgingReport> {
        self.get_json("/revenue/receivables", &[]).await
    }

    /// Fetches the revenue dashboard payload, optionally scoped to a period.
    pub async fn revenue_dashboard(
        &self,
        period: Option<&str>,
    ) -> AppResult<serde_json::Value> {
        self.get_json("/revenue/dashboard", &period_query(period))
            .await
    }

    /// Fetches the revenue trend, optionally scoped to a period.
    pub async fn revenue_trends(&self, period: Option<&str>) -> AppResult<serde_json::Value> {
        self.get_json("/revenue/trends", &period_query(period)).await
    }

    /// Fetches revenue broken down by category over a date range.
    pub async fn revenue_by_category(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> AppResult<serde_json::Value> {
        self.get_json(
            "/revenue/by-category",
            &date_range_query(date_from, date_to),
        )
        .await
    }

    /// Fetches revenue broken down by client over a date range.
    pub async fn revenue_by_client(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> AppResult<serde_json::Value> {
        self.get_json("/revenue/by-client", &date_range_query(date_from, date_to))
            .await
    }

    /// Fetches the cash-flow projection, optionally scoped to a period.
    pub async fn cash_flow(&self, period: Option<&str>) -> AppResult<serde_json::Value> {
        self.get_json("/revenue/cash-flow", &period_query(period))
            .await
    }

    /// Fetches revenue plotted against expenses, optionally scoped to a period.
    pub async fn revenue_vs_expenses(
        &self,
        period: Option<&str>,
    ) -> AppResult<serde_json::Value> {
        self.get_json("/revenue/vs-expenses", &period_query(period))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_period_query_pairs() {
        assert!(period_query(None).is_empty());
        assert_eq!(
            period_query(Some("2026-q2")),
            vec![("period".to_string(), "2026-q2".to_string())]
        );
    }

    #[test]
    fn test_date_range_query_pairs() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(
            date_range_query(Some(from), Some(to)),
            vec![
                ("dateFrom".to_string(), "2026-01-01".to_string()),
                ("dateTo".to_string(), "2026-03-31".to_string()),
            ]
        );
        assert_eq!(
            date_range_query(None, Some(to)),
            vec![("dateTo".to_string(), "2026-03-31".to_string())]
        );
    }

    #[test]
    fn test_recurring_revenue_wire_shape() {
        let raw = r#"{"mrr": "2450.00", "arr": "29400.00", "active_subscriptions": 14}"#;
        let revenue: RecurringRevenue = serde_json::from_str(raw).unwrap();
        assert_eq!(revenue.mrr, dec!(2450.00));
        assert_eq!(revenue.arr, dec!(29400.00));
        assert_eq!(revenue.active_subscriptions, 14);
    }

    #[test]
    fn test_aging_report_wire_shape() {
        let raw = r#"{
            "current": {"total": "1200.00", "count": 3},
            "thirty_one_to_sixty": {"total": "450.00", "count": 1},
            "over_sixty": {"total": "0", "count": 0},
            "total": "1650.00"
        }"#;
        let report: AgingReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.total, dec!(1650.00));
        assert_eq!(report.invoice_count(), 4);
    }
}
