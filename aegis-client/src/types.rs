//! Shared types for gateway calls.
//!
//! Field names follow the canister interfaces (camelCase on the wire).

use crate::error::{ClientError, ClientResult};
use aegis_crypto::EnvelopeMetadata;
use aegis_types::Principal;
use serde::{Deserialize, Serialize};

/// Motoko-style result variant: `{"ok": ...}` or `{"err": "..."}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CanisterReply<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "err")]
    Err(String),
}

impl<T> CanisterReply<T> {
    /// Converts the wire variant into a typed result.
    pub fn into_result(self) -> ClientResult<T> {
        match self {
            CanisterReply::Ok(value) => Ok(value),
            CanisterReply::Err(message) => Err(ClientError::Canister(message)),
        }
    }
}

/// Lifecycle state of a research query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Pending,
    Active,
    Completed,
    Expired,
}

/// A research query as distributed to vaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: u64,
    pub recipe_id: u64,
    pub description: String,
    /// Epoch milliseconds at submission.
    pub timestamp: i64,
    pub requester: Principal,
    pub status: QueryStatus,
    pub expires_at: i64,
}

/// Aggregate outcome of a completed query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub query_id: u64,
    pub true_count: u64,
    pub false_count: u64,
    pub total_responses: u64,
    pub participation_rate: f64,
    pub completed_at: Option<i64>,
}

/// A predefined analysis the aggregator offers to researchers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisRecipe {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Key/value pairs, e.g. `[("category", "Food"), ("threshold", "50")]`.
    pub parameters: Vec<(String, String)>,
}

/// Vault dashboard statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStats {
    pub owner: Principal,
    pub data_entries: u64,
    pub total_queries: u64,
    pub approved_queries: u64,
    pub rejected_queries: u64,
    pub last_activity: i64,
    pub vault_version: u64,
}

/// One entry of the vault's access log.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub timestamp: i64,
    pub action: String,
    pub query_id: Option<u64>,
    pub success: bool,
}

/// Aggregator health probe response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorHealth {
    pub status: String,
    pub version: u64,
    pub cycles_balance: u64,
    pub memory_usage: u64,
}

/// Vault health probe response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultHealth {
    pub status: String,
    pub owner: Principal,
    pub data_entries: u64,
    pub pending_queries: u64,
    pub version: u64,
    pub cycles_balance: u64,
}

/// Combined health report across services, tolerating partial failure.
#[derive(Clone, Debug)]
pub struct GatewayHealth {
    pub gateway_reachable: bool,
    pub aggregator: Option<AggregatorHealth>,
    pub vault: Option<VaultHealth>,
}

/// Receipt for an encrypted upload: what the caller needs to decrypt later.
#[derive(Clone, Debug)]
pub struct UploadReceipt {
    pub entry_id: u64,
    /// Hex SHA-256 of the stored blob; required for decryption.
    pub checksum: String,
    pub metadata: EnvelopeMetadata,
}

/// Token balance, with the zero fallback used when the ledger is absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenBalance {
    pub balance: u64,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenBalance {
    /// The degraded default reported when the token canister is unreachable.
    pub fn unavailable() -> Self {
        Self {
            balance: 0,
            symbol: "AVT".to_string(),
            decimals: 8,
        }
    }
}

/// One ledger transaction record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub index: u64,
    pub from: Principal,
    pub to: Principal,
    pub amount: u64,
    pub fee: u64,
    pub timestamp: i64,
    pub status: String,
    pub op: String,
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: ProposalStatus,
    pub votes_for: u64,
    pub votes_against: u64,
    pub voting_ends: i64,
    pub executed: bool,
}

/// Lifecycle state of a governance proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    Open,
    Passed,
    Rejected,
    Executed,
}

/// Payload of a governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalType {
    ParameterChange { parameter: String, new_value: String },
    FeatureToggle { feature: String, enabled: bool },
    TokenMint { recipient: Principal, amount: u64 },
}

/// Aggregate chain statistics, with fallbacks for absent canisters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainStats {
    pub total_supply: u64,
    pub total_transactions: u64,
    pub active_proposals: u64,
    pub token_holders: u64,
}
