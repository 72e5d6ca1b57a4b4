//! Encryption layer for the Aegis Vault client.
//!
//! Provides per-principal encryption using:
//! - PBKDF2-HMAC-SHA256 for key derivation (10,000 rounds, 256-bit keys)
//! - AES-256-GCM for authenticated encryption
//! - SHA-256 checksums for blob integrity
//!
//! # Architecture
//!
//! Keys are never stored. Every key is a deterministic function of the
//! principal text and a timestamp, so decryption re-derives a bounded
//! candidate set instead of looking keys up:
//!
//! 1. **Seal**: the plaintext and its provenance metadata are serialized as
//!    one JSON envelope, sealed under a key derived from the principal and
//!    the seal hour, and checksummed.
//!
//! 2. **Open**: the checksum is verified first (a mismatch is terminal),
//!    then candidates are trial-decrypted in order — current scheme,
//!    legacy scheme, then the trailing 24 hourly boundaries.
//!
//! The trial loop is acceptable only because the candidate set is small and
//! bounded; the envelope carries no key tag to select the right key
//! directly, and decryption cost is O(window) in the worst case.

mod engine;
mod error;
mod key;
mod keyset;

pub use engine::{
    decrypt, decrypt_at, encrypt, encrypt_at, generate_secure_random, hash_data,
    plaintext_from_bytes, verify_integrity, DecryptionResult, EncryptionResult,
    EnvelopeMetadata, NONCE_SIZE, TAG_SIZE,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, derive_salt, legacy_key, VaultKey, KDF_ROUNDS, KEY_SIZE};
pub use keyset::{candidate_keys, hour_floor, CANDIDATE_COUNT, COMPAT_WINDOW_HOURS};
