//! Gateway entry point: one HTTP client, cached per-canister handles.
//!
//! Service handles are cheap but not free (they capture config and session
//! references), and the dashboard asks for them repeatedly, so they are
//! cached per canister id. The cache is cleared whenever the identity
//! changes — a handle built under one principal must not serve another.

use crate::aggregator::AggregatorClient;
use crate::config::GatewayConfig;
use crate::error::{ClientError, ClientResult};
use crate::ledger::LedgerClient;
use crate::session::SessionManager;
use crate::types::GatewayHealth;
use crate::vault::VaultClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Header carrying the caller principal on canister calls.
pub const PRINCIPAL_HEADER: &str = "x-aegis-principal";

/// Shared plumbing for calls against one canister.
#[derive(Clone)]
pub(crate) struct CanisterCaller {
    http: reqwest::Client,
    gateway_url: String,
    canister_id: String,
    session: Arc<SessionManager>,
}

impl CanisterCaller {
    pub(crate) fn new(
        http: reqwest::Client,
        gateway_url: String,
        canister_id: String,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            http,
            gateway_url,
            canister_id,
            session,
        }
    }

    pub(crate) fn canister_id(&self) -> &str {
        &self.canister_id
    }

    pub(crate) async fn session_principal(&self) -> Option<aegis_types::Principal> {
        self.session.principal().await
    }

    /// POSTs a canister method call, attaching the session principal when
    /// one is present. Unauthenticated calls go out anonymously.
    pub(crate) async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        args: &impl Serialize,
    ) -> ClientResult<R> {
        let url = format!(
            "{}/api/canister/{}/{}",
            self.gateway_url, self.canister_id, method
        );

        let mut request = self.http.post(&url).json(args);
        if let Some(principal) = self.session.principal().await {
            request = request.header(PRINCIPAL_HEADER, principal.as_str());
        }

        let resp = request
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ClientError::Gateway(e.to_string()))?;

        Ok(resp.json().await?)
    }
}

/// Entry point for all remote services.
pub struct Gateway {
    http: reqwest::Client,
    config: GatewayConfig,
    session: Arc<SessionManager>,
    aggregators: RwLock<HashMap<String, Arc<AggregatorClient>>>,
    vaults: RwLock<HashMap<String, Arc<VaultClient>>>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, session: Arc<SessionManager>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            config,
            session,
            aggregators: RwLock::new(HashMap::new()),
            vaults: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The aggregator handle, cached per canister id.
    pub async fn aggregator(&self) -> Arc<AggregatorClient> {
        let canister_id = self.config.aggregator_canister.clone();

        if let Some(cached) = self.aggregators.read().await.get(&canister_id) {
            return Arc::clone(cached);
        }

        let handle = Arc::new(AggregatorClient::new(self.caller(&canister_id)));
        self.aggregators
            .write()
            .await
            .insert(canister_id, Arc::clone(&handle));
        handle
    }

    /// A vault handle, cached per canister id. `None` targets the
    /// configured default vault.
    pub async fn vault(&self, canister_id: Option<&str>) -> Arc<VaultClient> {
        let canister_id = canister_id
            .unwrap_or(&self.config.vault_canister)
            .to_string();

        if let Some(cached) = self.vaults.read().await.get(&canister_id) {
            return Arc::clone(cached);
        }

        let handle = Arc::new(VaultClient::new(self.caller(&canister_id)));
        self.vaults
            .write()
            .await
            .insert(canister_id, Arc::clone(&handle));
        handle
    }

    /// The ledger handle. Not cached: it is built from optional canisters
    /// and holds no state of its own.
    pub fn ledger(&self) -> LedgerClient {
        let token = self
            .config
            .token_canister
            .as_deref()
            .map(|id| self.caller(id));
        let governance = self
            .config
            .governance_canister
            .as_deref()
            .map(|id| self.caller(id));
        LedgerClient::new(token, governance)
    }

    /// Empties the handle caches. Call on login/logout.
    pub async fn clear_cache(&self) {
        debug!("clearing canister handle caches");
        self.aggregators.write().await.clear();
        self.vaults.write().await.clear();
    }

    /// Probes every core service, tolerating individual failures.
    pub async fn health_check(&self) -> GatewayHealth {
        let aggregator = match self.aggregator().await.health_check().await {
            Ok(health) => Some(health),
            Err(e) => {
                warn!("aggregator health check failed: {e}");
                None
            }
        };

        let vault = match self.vault(None).await.health_check().await {
            Ok(health) => Some(health),
            Err(e) => {
                warn!("vault health check failed: {e}");
                None
            }
        };

        GatewayHealth {
            gateway_reachable: aggregator.is_some() || vault.is_some(),
            aggregator,
            vault,
        }
    }

    fn caller(&self, canister_id: &str) -> CanisterCaller {
        CanisterCaller::new(
            self.http.clone(),
            self.config.gateway_url.clone(),
            canister_id.to_string(),
            Arc::clone(&self.session),
        )
    }
}
