//! Delegated identity session management.
//!
//! The identity provider owns the delegation protocol; this module only
//! tracks the resulting session — which principal is logged in and until
//! when — and offers a linear-backoff retry helper for flaky operations.

use crate::config::GatewayConfig;
use crate::error::{ClientError, ClientResult};
use aegis_types::Principal;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Maximum session lifetime requested from the provider: 7 days, in ms.
const SESSION_MAX_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// State shared across session manager clones.
struct SessionState {
    principal: Option<Principal>,
    expires_at: Option<DateTime<Utc>>,
}

/// Tracks the current delegated identity session.
pub struct SessionManager {
    client: reqwest::Client,
    config: GatewayConfig,
    state: Arc<RwLock<SessionState>>,
}

#[derive(Deserialize)]
struct SessionResponse {
    principal: Principal,
    expires_at: DateTime<Utc>,
}

impl SessionManager {
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            config,
            state: Arc::new(RwLock::new(SessionState {
                principal: None,
                expires_at: None,
            })),
        }
    }

    /// Logs in against the identity provider and records the session.
    ///
    /// The provider must never hand back the anonymous principal; doing so
    /// is treated as a failed login.
    pub async fn login(&self) -> ClientResult<Principal> {
        let url = format!("{}/api/session", self.config.identity_provider_url);
        let resp: SessionResponse = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "max_ttl_ms": SESSION_MAX_TTL_MS }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?
            .json()
            .await?;

        if resp.principal.is_anonymous() {
            return Err(ClientError::AuthFailed(
                "identity provider returned the anonymous principal".to_string(),
            ));
        }

        debug!(
            "session established for {} until {}",
            resp.principal, resp.expires_at
        );

        let mut state = self.state.write().await;
        state.principal = Some(resp.principal.clone());
        state.expires_at = Some(resp.expires_at);

        Ok(resp.principal)
    }

    /// Restores a previously persisted session without hitting the provider.
    pub async fn restore(&self, principal: Principal, expires_at: DateTime<Utc>) {
        let mut state = self.state.write().await;
        state.principal = Some(principal);
        state.expires_at = Some(expires_at);
    }

    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        state.principal = None;
        state.expires_at = None;
    }

    /// The logged-in principal, if any.
    pub async fn principal(&self) -> Option<Principal> {
        self.state.read().await.principal.clone()
    }

    /// True when a non-anonymous, unexpired session is present.
    pub async fn is_authenticated(&self) -> bool {
        let state = self.state.read().await;
        let live = state
            .expires_at
            .is_some_and(|expires_at| Utc::now() < expires_at);
        live && state.principal.as_ref().is_some_and(|p| !p.is_anonymous())
    }

    /// Revalidates the session, clearing it if it has expired.
    pub async fn check_session(&self) -> bool {
        if self.is_authenticated().await {
            return true;
        }
        // Expired or never established; drop any stale principal.
        self.logout().await;
        false
    }

    /// Runs an operation with up to `max_retries` attempts, sleeping
    /// `attempt * 1s` between them. The last error wins.
    pub async fn retry_operation<T, F, Fut>(&self, mut operation: F) -> ClientResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    attempt += 1;
                    if attempt >= self.config.max_retries.max(1) {
                        return Err(error);
                    }
                    debug!("retrying operation (attempt {attempt}): {error}");
                    tokio::time::sleep(std::time::Duration::from_secs(u64::from(attempt))).await;
                }
            }
        }
    }
}
