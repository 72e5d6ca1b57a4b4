//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the gateway and its canisters.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("gateway request failed: {0}")]
    Gateway(String),

    /// A canister method returned its `err` variant.
    #[error("canister rejected the call: {0}")]
    Canister(String),

    #[error("authentication required")]
    AuthRequired,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] aegis_crypto::CryptoError),

    #[error("dataset error: {0}")]
    Dataset(#[from] aegis_datasets::DatasetError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
