//! Contract endpoints and lifecycle transitions.
//!
//! Transitions are validated locally against the lifecycle table before the
//! request goes out, so an illegal action fails fast without a round trip.
//! The same server-side check still runs; a 409/422 surfaces as a conflict
//! if the mirrored status was stale.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fathom_core::contract::{
    Contract, ContractError, ContractLifecycle, ContractType, LifecycleAction,
};
use fathom_shared::types::{ClientId, ContractId, ListQuery, Paginated, Pagination};
use fathom_shared::AppResult;

use crate::ApiClient;

/// Fields for creating or updating a contract.
#[derive(Debug, Clone, Serialize)]
pub struct ContractInput {
    /// Contract title.
    pub title: String,
    /// Owning client.
    pub client_id: ClientId,
    /// Contract type.
    pub contract_type: ContractType,
    /// Contract value, if fixed.
    pub value: Option<Decimal>,
    /// Start date.
    pub start_date: NaiveDate,
    /// Optional end date.
    pub end_date: Option<NaiveDate>,
    /// Whether the contract renews automatically.
    pub auto_renewal: bool,
}

/// A confirmed contract transition.
#[derive(Debug, Clone)]
pub struct ContractTransition {
    /// The contract as returned by the server after the transition.
    pub contract: Contract,
    /// True when cached revenue figures are now stale and must be refetched.
    pub revenue_stale: bool,
}

#[derive(Debug, Serialize)]
struct SignRequest {
    signed_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ContractListResponse {
    contracts: Vec<Contract>,
    pagination: Pagination,
}

impl ApiClient {
    /// Lists contracts with search, filter, sort, and pagination.
    pub async fn list_contracts(&self, query: &ListQuery) -> AppResult<Paginated<Contract>> {
        let response: ContractListResponse = self
            .get_json("/contracts", &query.to_query_pairs())
            .await?;
        Ok(Paginated {
            items: response.contracts,
            pagination: response.pagination,
        })
    }

    /// Fetches a single contract.
    pub async fn get_contract(&self, id: ContractId) -> AppResult<Contract> {
        self.get_json(&format!("/contracts/{id}"), &[]).await
    }

    /// Creates a contract in draft.
    pub async fn create_contract(&self, input: &ContractInput) -> AppResult<Contract> {
        self.post_json("/contracts", input).await
    }

    /// Updates a contract's fields. Rejected once the contract is terminal.
    pub async fn update_contract(
        &self,
        contract: &Contract,
        input: &ContractInput,
    ) -> AppResult<Contract> {
        if !contract.status.is_editable() {
            return Err(ContractError::NotEditable(contract.status).into());
        }
        self.put_json(&format!("/contracts/{}", contract.id), input)
            .await
    }

    /// Deletes a contract.
    pub async fn delete_contract(&self, id: ContractId) -> AppResult<()> {
        self.delete(&format!("/contracts/{id}")).await
    }

    /// Signs a draft contract, moving it to pending signature.
    pub async fn sign_contract(
        &self,
        contract: &Contract,
        signed_date: Option<NaiveDate>,
    ) -> AppResult<ContractTransition> {
        let action = ContractLifecycle::sign(contract.status, signed_date)?;
        let LifecycleAction::Sign { signed_date, .. } = action else {
            unreachable!("sign returns a Sign action");
        };
        let updated = self
            .post_json(
                &format!("/contracts/{}/sign", contract.id),
                &SignRequest { signed_date },
            )
            .await?;
        Ok(Self::transition(updated, &action))
    }

    /// Activates a signed contract.
    pub async fn activate_contract(&self, contract: &Contract) -> AppResult<ContractTransition> {
        let action = ContractLifecycle::activate(contract.status)?;
        let updated = self
            .post_empty(&format!("/contracts/{}/activate", contract.id))
            .await?;
        Ok(Self::transition(updated, &action))
    }

    /// Completes an active contract.
    pub async fn complete_contract(&self, contract: &Contract) -> AppResult<ContractTransition> {
        let action = ContractLifecycle::complete(contract.status)?;
        let updated = self
            .post_empty(&format!("/contracts/{}/complete", contract.id))
            .await?;
        Ok(Self::transition(updated, &action))
    }

    /// Cancels a non-terminal contract.
    pub async fn cancel_contract(&self, contract: &Contract) -> AppResult<ContractTransition> {
        let action = ContractLifecycle::cancel(contract.status)?;
        let updated = self
            .post_empty(&format!("/contracts/{}/cancel", contract.id))
            .await?;
        Ok(Self::transition(updated, &action))
    }

    fn transition(contract: Contract, action: &LifecycleAction) -> ContractTransition {
        let revenue_stale = action.invalidates_revenue();
        if revenue_stale {
            tracing::debug!(contract_id = %contract.id, "revenue aggregates marked stale");
        }
        ContractTransition {
            contract,
            revenue_stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_core::contract::ContractStatus;

    fn contract(status: ContractStatus) -> Contract {
        Contract {
            id: ContractId::new(),
            title: "Retainer 2026".to_string(),
            client_id: ClientId::new(),
            contract_type: ContractType::Retainer,
            value: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: None,
            status,
            signed_date: None,
            auto_renewal: true,
        }
    }

    #[test]
    fn test_transition_marks_revenue_stale_on_activate() {
        let action = ContractLifecycle::activate(ContractStatus::PendingSignature).unwrap();
        let result = ApiClient::transition(contract(ContractStatus::Active), &action);
        assert!(result.revenue_stale);
    }

    #[test]
    fn test_transition_keeps_revenue_fresh_on_cancel() {
        let action = ContractLifecycle::cancel(ContractStatus::Draft).unwrap();
        let result = ApiClient::transition(contract(ContractStatus::Cancelled), &action);
        assert!(!result.revenue_stale);
    }

    #[tokio::test]
    async fn test_update_rejected_once_terminal() {
        let config = fathom_shared::AppConfig {
            api: fathom_shared::config::ApiConfig {
                base_url: "http://localhost:9/api".to_string(),
                timeout_secs: 1,
            },
            auth: fathom_shared::config::AuthConfig {
                refresh_path: "/auth/refresh".to_string(),
            },
        };
        let client = ApiClient::new(&config).unwrap();
        let input = ContractInput {
            title: "Retainer 2026".to_string(),
            client_id: ClientId::new(),
            contract_type: ContractType::Retainer,
            value: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: None,
            auto_renewal: true,
        };
        // The guard fires before any request goes out.
        let err = client
            .update_contract(&contract(ContractStatus::Completed), &input)
            .await
            .unwrap_err();
        assert!(matches!(err, fathom_shared::AppError::Conflict(_)));
    }

    #[test]
    fn test_sign_request_wire_shape() {
        let body = SignRequest {
            signed_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["signed_date"], "2026-03-15");
    }
}
