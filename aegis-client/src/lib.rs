//! Gateway client for the Aegis Vault platform.
//!
//! Provides the client-side service layer:
//! - Delegated identity sessions (login, expiry, linear-backoff retries)
//! - Cached per-canister service handles behind one HTTP client
//! - Typed aggregator and vault endpoints over the gateway's JSON interface
//! - The encrypted upload flow (seal with aegis-crypto, then upload)
//! - Local research-query evaluation that submits only a boolean
//! - Optional token/governance endpoints that degrade gracefully

pub mod aggregator;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod responder;
pub mod session;
pub mod types;
pub mod vault;

pub use aggregator::AggregatorClient;
pub use config::GatewayConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{Gateway, PRINCIPAL_HEADER};
pub use ledger::LedgerClient;
pub use session::SessionManager;
pub use types::*;
pub use vault::VaultClient;
