//! Principal-bound key derivation.
//!
//! Keys are stretched with PBKDF2-HMAC-SHA256 from the principal text plus
//! an optional timestamp, salted with a domain-prefixed per-principal salt.
//! The derivation is deterministic: the same inputs always yield the same
//! key, which is what lets decryption re-derive candidates instead of
//! storing key material anywhere.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a derived symmetric key in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// PBKDF2 iteration count.
pub const KDF_ROUNDS: u32 = 10_000;

/// Length of the truncated hex salt string.
const SALT_LEN: usize = 16;

const SALT_PREFIX: &str = "aegis-vault-salt-";
const LEGACY_SUFFIX: &str = "aegis-vault-secret-key";

/// A 256-bit symmetric key, zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: [u8; KEY_SIZE],
}

impl VaultKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Raw key bytes. Never log or serialize the result.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Per-principal PBKDF2 salt: hex SHA-256 of the domain-prefixed principal,
/// truncated to 16 characters.
pub fn derive_salt(principal: &str) -> String {
    let digest = Sha256::digest(format!("{SALT_PREFIX}{principal}"));
    let mut salt = hex::encode(digest);
    salt.truncate(SALT_LEN);
    salt
}

/// Derives a key from a principal and an optional timestamp (epoch ms).
///
/// Always succeeds for well-formed string input; there is no error path.
pub fn derive_key(principal: &str, timestamp_ms: Option<i64>) -> VaultKey {
    let salt = derive_salt(principal);
    let base = match timestamp_ms {
        Some(ts) => format!("{principal}{ts}"),
        None => principal.to_string(),
    };

    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(base.as_bytes(), salt.as_bytes(), KDF_ROUNDS, &mut bytes);
    VaultKey { bytes }
}

/// The pre-rotation derivation scheme: a bare SHA-256 of the principal plus
/// a fixed suffix. Kept only so blobs sealed before the PBKDF2 migration
/// stay readable.
pub fn legacy_key(principal: &str) -> VaultKey {
    let digest = Sha256::digest(format!("{principal}{LEGACY_SUFFIX}"));
    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&digest);
    VaultKey { bytes }
}
