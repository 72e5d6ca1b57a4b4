//! Gateway client configuration.

use serde::{Deserialize, Serialize};

/// Canister id used when an environment does not pin a real one.
pub const PLACEHOLDER_CANISTER_ID: &str = "rdmx6-jaaaa-aaaah-qcaiq-cai";

/// Configuration for the gateway client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the boundary gateway (e.g. "https://ic0.app").
    pub gateway_url: String,

    /// Base URL of the delegated identity provider.
    pub identity_provider_url: String,

    /// Canister id of the research aggregator.
    pub aggregator_canister: String,

    /// Canister id of the user's vault.
    pub vault_canister: String,

    /// Optional token ledger canister; features degrade gracefully when absent.
    pub token_canister: Option<String>,

    /// Optional governance canister; features degrade gracefully when absent.
    pub governance_canister: Option<String>,

    /// Attempts made by the session retry helper before giving up.
    pub max_retries: u32,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateway_url: "https://ic0.app".to_string(),
            identity_provider_url: "https://identity.ic0.app".to_string(),
            aggregator_canister: PLACEHOLDER_CANISTER_ID.to_string(),
            vault_canister: PLACEHOLDER_CANISTER_ID.to_string(),
            token_canister: None,
            governance_canister: None,
            max_retries: 3,
            request_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Configuration for a local replica and identity provider.
    pub fn local() -> Self {
        Self {
            gateway_url: "http://localhost:4943".to_string(),
            identity_provider_url: "http://localhost:4943".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_mainnet() {
        let config = GatewayConfig::default();
        assert_eq!(config.gateway_url, "https://ic0.app");
        assert_eq!(config.identity_provider_url, "https://identity.ic0.app");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn local_overrides_hosts_only() {
        let config = GatewayConfig::local();
        assert!(config.gateway_url.starts_with("http://localhost"));
        assert_eq!(config.aggregator_canister, PLACEHOLDER_CANISTER_ID);
    }
}
