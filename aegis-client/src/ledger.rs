//! Token and governance endpoints.
//!
//! Both canisters are optional deployments. Read paths degrade to neutral
//! values when a canister is missing or unreachable so the rest of the app
//! keeps working; write paths (transfer, vote) fail loudly instead.

use crate::error::{ClientError, ClientResult};
use crate::gateway::CanisterCaller;
use crate::types::{
    CanisterReply, ChainStats, Proposal, ProposalStatus, ProposalType, TokenBalance, Transaction,
};
use aegis_types::Principal;
use tracing::warn;

/// Typed handle for the optional token and governance canisters.
pub struct LedgerClient {
    token: Option<CanisterCaller>,
    governance: Option<CanisterCaller>,
}

impl LedgerClient {
    pub(crate) fn new(token: Option<CanisterCaller>, governance: Option<CanisterCaller>) -> Self {
        Self { token, governance }
    }

    pub fn has_token_canister(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_governance_canister(&self) -> bool {
        self.governance.is_some()
    }

    /// Token balance for a principal, or the zero fallback when the token
    /// canister is absent or failing.
    pub async fn balance(&self, principal: &Principal) -> TokenBalance {
        let Some(token) = &self.token else {
            return TokenBalance::unavailable();
        };

        let fetched = self.fetch_balance(token, principal).await;
        match fetched {
            Ok(balance) => balance,
            Err(e) => {
                warn!("failed to get token balance: {e}");
                TokenBalance::unavailable()
            }
        }
    }

    async fn fetch_balance(
        &self,
        token: &CanisterCaller,
        principal: &Principal,
    ) -> ClientResult<TokenBalance> {
        let balance: u64 = token
            .call("balanceOf", &serde_json::json!({ "principal": principal }))
            .await?;
        let symbol: String = token.call("symbol", &serde_json::json!({})).await?;
        let decimals: u8 = token.call("decimals", &serde_json::json!({})).await?;

        Ok(TokenBalance {
            balance,
            symbol,
            decimals,
        })
    }

    /// Transfers tokens; returns the transaction id.
    pub async fn transfer(&self, to: &Principal, amount: u64) -> ClientResult<u64> {
        let token = self.token.as_ref().ok_or_else(|| {
            ClientError::ServiceUnavailable("token canister not configured".to_string())
        })?;

        let reply: CanisterReply<u64> = token
            .call(
                "transfer",
                &serde_json::json!({ "to": to, "amount": amount }),
            )
            .await?;
        reply.into_result()
    }

    /// Transaction history page, empty when the token canister is absent
    /// or failing.
    pub async fn transactions(&self, start: u64, limit: u64) -> Vec<Transaction> {
        let Some(token) = &self.token else {
            return Vec::new();
        };

        let fetched: ClientResult<Vec<Transaction>> = token
            .call(
                "getTransactions",
                &serde_json::json!({ "start": start, "limit": limit }),
            )
            .await;
        match fetched {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("failed to get transaction history: {e}");
                Vec::new()
            }
        }
    }

    /// Submits a governance proposal; returns the proposal id.
    pub async fn submit_proposal(
        &self,
        title: &str,
        description: &str,
        proposal_type: &ProposalType,
    ) -> ClientResult<u64> {
        let governance = self.governance.as_ref().ok_or_else(|| {
            ClientError::ServiceUnavailable("governance canister not configured".to_string())
        })?;

        let reply: CanisterReply<u64> = governance
            .call(
                "submitProposal",
                &serde_json::json!({
                    "title": title,
                    "description": description,
                    "proposalType": proposal_type,
                }),
            )
            .await?;
        reply.into_result()
    }

    /// Casts a vote on a proposal.
    pub async fn vote(&self, proposal_id: u64, support: bool) -> ClientResult<String> {
        let governance = self.governance.as_ref().ok_or_else(|| {
            ClientError::ServiceUnavailable("governance canister not configured".to_string())
        })?;

        let reply: CanisterReply<String> = governance
            .call(
                "vote",
                &serde_json::json!({ "proposalId": proposal_id, "support": support }),
            )
            .await?;
        reply.into_result()
    }

    /// All proposals, empty when governance is absent or failing.
    pub async fn proposals(&self) -> Vec<Proposal> {
        let Some(governance) = &self.governance else {
            return Vec::new();
        };

        let fetched: ClientResult<Vec<Proposal>> = governance
            .call("getAllProposals", &serde_json::json!({}))
            .await;
        match fetched {
            Ok(proposals) => proposals,
            Err(e) => {
                warn!("failed to get proposals: {e}");
                Vec::new()
            }
        }
    }

    /// Aggregate chain statistics, assembled with fallbacks.
    pub async fn stats(&self) -> ChainStats {
        let total_supply = match &self.token {
            Some(token) => {
                let fetched: ClientResult<u64> =
                    token.call("totalSupply", &serde_json::json!({})).await;
                fetched.unwrap_or_else(|e| {
                    warn!("failed to get total supply: {e}");
                    0
                })
            }
            None => 0,
        };

        let proposals = self.proposals().await;
        let active_proposals = proposals
            .iter()
            .filter(|p| p.status == ProposalStatus::Open)
            .count() as u64;

        ChainStats {
            total_supply,
            total_transactions: 0,
            active_proposals,
            token_holders: 0,
        }
    }
}
