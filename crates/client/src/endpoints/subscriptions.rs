//! Subscription endpoints and status transitions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fathom_core::subscription::{BillingCycle, ChurnStats, Subscription, SubscriptionLifecycle};
use fathom_shared::types::{ClientId, ContractId, ListQuery, Paginated, Pagination, SubscriptionId};
use fathom_shared::AppResult;

use crate::ApiClient;

/// Fields for creating or updating a subscription.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionInput {
    /// Display name.
    pub name: String,
    /// Owning client.
    pub client_id: ClientId,
    /// Optional linked contract.
    pub contract_id: Option<ContractId>,
    /// Amount billed per cycle.
    pub amount: Decimal,
    /// Billing cycle.
    pub billing_cycle: BillingCycle,
    /// Start date.
    pub start_date: NaiveDate,
    /// Whether the subscription renews automatically.
    pub auto_renewal: bool,
}

#[derive(Debug, Serialize)]
struct CancelRequest<'a> {
    cancelled_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionListResponse {
    subscriptions: Vec<Subscription>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct RenewalsResponse {
    renewals: Vec<Subscription>,
}

impl ApiClient {
    /// Lists subscriptions with search, filter, sort, and pagination.
    pub async fn list_subscriptions(
        &self,
        query: &ListQuery,
    ) -> AppResult<Paginated<Subscription>> {
        let response: SubscriptionListResponse = self
            .get_json("/subscriptions", &query.to_query_pairs())
            .await?;
        Ok(Paginated {
            items: response.subscriptions,
            pagination: response.pagination,
        })
    }

    /// Fetches a single subscription.
    pub async fn get_subscription(&self, id: SubscriptionId) -> AppResult<Subscription> {
        self.get_json(&format!("/subscriptions/{id}"), &[]).await
    }

    /// Creates a subscription.
    pub async fn create_subscription(&self, input: &SubscriptionInput) -> AppResult<Subscription> {
        self.post_json("/subscriptions", input).await
    }

    /// Updates a subscription's fields.
    pub async fn update_subscription(
        &self,
        id: SubscriptionId,
        input: &SubscriptionInput,
    ) -> AppResult<Subscription> {
        self.put_json(&format!("/subscriptions/{id}"), input).await
    }

    /// Deletes a subscription.
    pub async fn delete_subscription(&self, id: SubscriptionId) -> AppResult<()> {
        self.delete(&format!("/subscriptions/{id}")).await
    }

    /// Activates a trial or past-due subscription.
    pub async fn activate_subscription(
        &self,
        subscription: &Subscription,
    ) -> AppResult<Subscription> {
        SubscriptionLifecycle::activate(subscription.status)?;
        self.post_empty(&format!("/subscriptions/{}/activate", subscription.id))
            .await
    }

    /// Pauses an active subscription. MRR attribution stops while paused.
    pub async fn pause_subscription(&self, subscription: &Subscription) -> AppResult<Subscription> {
        SubscriptionLifecycle::pause(subscription.status)?;
        self.post_empty(&format!("/subscriptions/{}/pause", subscription.id))
            .await
    }

    /// Resumes a paused subscription.
    pub async fn resume_subscription(
        &self,
        subscription: &Subscription,
    ) -> AppResult<Subscription> {
        SubscriptionLifecycle::resume(subscription.status)?;
        self.post_empty(&format!("/subscriptions/{}/resume", subscription.id))
            .await
    }

    /// Cancels a subscription. The cancellation date bounds MRR attribution.
    pub async fn cancel_subscription(
        &self,
        subscription: &Subscription,
        cancelled_date: Option<NaiveDate>,
        reason: Option<&str>,
    ) -> AppResult<Subscription> {
        let cancellation = SubscriptionLifecycle::cancel(
            subscription.status,
            cancelled_date,
            reason.map(ToString::to_string),
        )?;
        self.post_json(
            &format!("/subscriptions/{}/cancel", subscription.id),
            &CancelRequest {
                cancelled_date: cancellation.cancelled_date,
                reason,
            },
        )
        .await
    }

    /// Lists subscriptions renewing within the next `days_ahead` days.
    pub async fn upcoming_renewals(&self, days_ahead: u32) -> AppResult<Vec<Subscription>> {
        let response: RenewalsResponse = self
            .get_json(
                "/subscriptions/renewals",
                &[("daysAhead".to_string(), days_ahead.to_string())],
            )
            .await?;
        Ok(response.renewals)
    }

    /// Fetches subscription statistics.
    ///
    /// Returned untyped; the dashboard owns the shape.
    pub async fn subscription_stats(&self) -> AppResult<serde_json::Value> {
        self.get_json("/subscriptions/stats", &[]).await
    }

    /// Fetches the MRR/ARR summary scoped to subscriptions.
    ///
    /// Same figures as the revenue endpoint; exposed here too because the
    /// subscriptions page loads them without the rest of the dashboard.
    pub async fn subscription_mrr(&self) -> AppResult<super::revenue::RecurringRevenue> {
        self.get_json("/subscriptions/mrr", &[]).await
    }

    /// Fetches the churn figures from the subscription statistics payload.
    ///
    /// The rate is computed upstream; it is mirrored here read-only and
    /// never recomputed locally.
    pub async fn churn_stats(&self) -> AppResult<ChurnStats> {
        self.get_json("/subscriptions/stats", &[]).await
    }
}
