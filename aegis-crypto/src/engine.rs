//! Seal/open engine for vault blobs.
//!
//! A plaintext is wrapped in a JSON envelope `{content, metadata}`, the
//! envelope is sealed with AES-256-GCM under a principal-derived key, and a
//! SHA-256 checksum of the resulting blob travels alongside it. Opening
//! verifies the checksum first, then trial-decrypts against the candidate
//! key set until one yields a parseable envelope.
//!
//! Blob layout: `nonce (12 bytes) || ciphertext + tag (16 bytes)`.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, VaultKey};
use crate::keyset::{candidate_keys, hour_floor};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

const ALGORITHM: &str = "AES";
const KEY_DERIVATION: &str = "PBKDF2";

/// Provenance of an encrypted blob. Round-trips through the envelope
/// unchanged, using the original wire field names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMetadata {
    pub algorithm: String,
    pub key_derivation: String,
    /// Epoch milliseconds at seal time.
    pub timestamp: i64,
    /// Byte length of the original plaintext.
    pub original_size: usize,
}

/// The unit that gets serialized and sealed. Older blobs may lack the
/// metadata field; opening synthesizes a default in that case.
#[derive(Serialize, Deserialize)]
struct Envelope {
    content: String,
    metadata: Option<EnvelopeMetadata>,
}

/// Output of [`encrypt`]. Immutable; owned by the caller.
#[derive(Clone, Debug)]
pub struct EncryptionResult {
    pub encrypted_data: Vec<u8>,
    /// Lowercase hex SHA-256 of `encrypted_data`.
    pub checksum: String,
    pub metadata: EnvelopeMetadata,
}

/// Output of [`decrypt`].
#[derive(Clone, Debug)]
pub struct DecryptionResult {
    pub data: String,
    /// True when the blob passed the integrity check. Always true on the
    /// success path; a failed check is a terminal error instead.
    pub verified: bool,
    pub metadata: EnvelopeMetadata,
}

/// Encrypts `content` for `principal` at the current wall-clock time.
pub fn encrypt(content: &str, principal: &str) -> CryptoResult<EncryptionResult> {
    encrypt_at(content, principal, aegis_types::now_millis())
}

/// Encrypts `content` with an explicit seal timestamp (epoch ms).
///
/// The exact timestamp is recorded in the envelope metadata; the seal key
/// is derived from its hourly boundary so the blob lines up with the
/// candidate lattice that decryption walks.
pub fn encrypt_at(
    content: &str,
    principal: &str,
    timestamp_ms: i64,
) -> CryptoResult<EncryptionResult> {
    let key = derive_key(principal, Some(hour_floor(timestamp_ms)));

    let metadata = EnvelopeMetadata {
        algorithm: ALGORITHM.to_string(),
        key_derivation: KEY_DERIVATION.to_string(),
        timestamp: timestamp_ms,
        original_size: content.len(),
    };

    let envelope = Envelope {
        content: content.to_string(),
        metadata: Some(metadata.clone()),
    };
    let plaintext = serde_json::to_vec(&envelope)?;

    let encrypted_data = seal(&key, &plaintext)?;
    let checksum = hash_bytes(&encrypted_data);

    Ok(EncryptionResult {
        encrypted_data,
        checksum,
        metadata,
    })
}

/// Decrypts a blob for `principal`, anchored at the current wall clock.
pub fn decrypt(
    blob: &[u8],
    principal: &str,
    expected_checksum: &str,
) -> CryptoResult<DecryptionResult> {
    decrypt_at(blob, principal, expected_checksum, aegis_types::now_millis())
}

/// Decrypts a blob with an explicit clock anchor for the candidate window.
///
/// The checksum is verified before any key is tried; a mismatch is a
/// terminal [`CryptoError::Integrity`], never retried. Candidates are then
/// attempted in order, short-circuiting on the first one that opens the
/// cipher and parses as an envelope.
pub fn decrypt_at(
    blob: &[u8],
    principal: &str,
    expected_checksum: &str,
    now_ms: i64,
) -> CryptoResult<DecryptionResult> {
    let actual = hash_bytes(blob);
    if actual != expected_checksum {
        return Err(CryptoError::Integrity {
            expected: expected_checksum.to_string(),
            actual,
        });
    }

    for key in candidate_keys(principal, now_ms) {
        let Ok(plaintext) = open(&key, blob) else {
            continue;
        };
        let Ok(envelope) = serde_json::from_slice::<Envelope>(&plaintext) else {
            continue;
        };

        let metadata = envelope.metadata.unwrap_or(EnvelopeMetadata {
            algorithm: ALGORITHM.to_string(),
            key_derivation: KEY_DERIVATION.to_string(),
            timestamp: now_ms,
            original_size: envelope.content.len(),
        });

        return Ok(DecryptionResult {
            data: envelope.content,
            verified: true,
            metadata,
        });
    }

    Err(CryptoError::NoKeyMatched)
}

/// Decodes plaintext bytes as UTF-8, the precondition for [`encrypt`].
pub fn plaintext_from_bytes(bytes: &[u8]) -> CryptoResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| CryptoError::Read(e.to_string()))
}

/// Lowercase hex SHA-256 of a string, for caller-side integrity checks.
pub fn hash_data(data: &str) -> String {
    hash_bytes(data.as_bytes())
}

/// Verifies a string against a previously computed [`hash_data`] digest.
pub fn verify_integrity(data: &str, expected_hash: &str) -> bool {
    hash_data(data) == expected_hash
}

/// `len` random bytes, hex-encoded.
pub fn generate_secure_random(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn seal(key: &VaultKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::Encryption("cipher seal failed".to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend(ciphertext);
    Ok(blob)
}

/// Attempts to open a blob with a single candidate key. A wrong key fails
/// at the GCM tag check, which is what makes the trial loop deterministic.
fn open(key: &VaultKey, blob: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
    if blob.len() < NONCE_SIZE + TAG_SIZE {
        return Err(aes_gcm::Error);
    }

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = Nonce::from_slice(&blob[..NONCE_SIZE]);
    cipher.decrypt(nonce, &blob[NONCE_SIZE..])
}
