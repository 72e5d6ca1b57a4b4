//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening vault data.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The plaintext could not be obtained (e.g. not valid UTF-8).
    #[error("failed to read plaintext: {0}")]
    Read(String),

    /// Envelope construction or parsing failed.
    #[error("envelope serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The cipher rejected the encryption request.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Checksum mismatch. Terminal: no candidate key is ever tried.
    #[error("data integrity check failed: expected checksum {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    /// Every candidate key was tried without producing a valid envelope.
    #[error("cannot decrypt with any available key")]
    NoKeyMatched,
}
