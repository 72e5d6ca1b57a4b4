//! User vault endpoints and the encrypted upload flow.
//!
//! The vault canister only ever sees sealed blobs; encryption happens here,
//! under the session principal, before any byte leaves the client.

use crate::error::{ClientError, ClientResult};
use crate::gateway::CanisterCaller;
use crate::types::{AccessLog, CanisterReply, Query, UploadReceipt, VaultHealth, VaultStats};
use aegis_types::Principal;

/// Typed handle for a user vault canister.
pub struct VaultClient {
    caller: CanisterCaller,
}

impl VaultClient {
    pub(crate) fn new(caller: CanisterCaller) -> Self {
        Self { caller }
    }

    pub fn canister_id(&self) -> &str {
        self.caller.canister_id()
    }

    /// One-time vault initialization for a fresh canister.
    pub async fn initialize(&self) -> ClientResult<String> {
        let reply: CanisterReply<String> = self
            .caller
            .call("initialize", &serde_json::json!({}))
            .await?;
        reply.into_result()
    }

    /// Uploads an already-sealed blob; returns the vault entry id.
    pub async fn upload_data(&self, data: &[u8], filename: &str) -> ClientResult<u64> {
        let reply: CanisterReply<u64> = self
            .caller
            .call(
                "uploadData",
                &serde_json::json!({ "data": data, "filename": filename }),
            )
            .await?;
        reply.into_result()
    }

    /// Encrypts `content` under the session principal and uploads the blob.
    ///
    /// The returned receipt carries the checksum and metadata the caller
    /// must keep to decrypt the entry later; the engine itself stores
    /// nothing.
    pub async fn upload_encrypted(
        &self,
        content: &str,
        filename: &str,
    ) -> ClientResult<UploadReceipt> {
        let principal = self
            .caller
            .session_principal()
            .await
            .ok_or(ClientError::AuthRequired)?;

        let sealed = aegis_crypto::encrypt(content, principal.as_str())?;
        let entry_id = self.upload_data(&sealed.encrypted_data, filename).await?;

        Ok(UploadReceipt {
            entry_id,
            checksum: sealed.checksum,
            metadata: sealed.metadata,
        })
    }

    /// Like [`upload_encrypted`](Self::upload_encrypted) for raw file bytes;
    /// fails with a read error when the bytes are not UTF-8 text.
    pub async fn upload_encrypted_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> ClientResult<UploadReceipt> {
        let content = aegis_crypto::plaintext_from_bytes(bytes)?;
        self.upload_encrypted(&content, filename).await
    }

    /// Decrypts a blob previously downloaded from this vault.
    pub async fn decrypt_entry(
        &self,
        blob: &[u8],
        checksum: &str,
    ) -> ClientResult<String> {
        let principal = self
            .caller
            .session_principal()
            .await
            .ok_or(ClientError::AuthRequired)?;

        let opened = aegis_crypto::decrypt(blob, principal.as_str(), checksum)?;
        Ok(opened.data)
    }

    pub async fn get_pending_queries(&self) -> ClientResult<Vec<Query>> {
        let reply: CanisterReply<Vec<Query>> = self
            .caller
            .call("getPendingQueries", &serde_json::json!({}))
            .await?;
        reply.into_result()
    }

    pub async fn approve_request(&self, query_id: u64) -> ClientResult<bool> {
        let reply: CanisterReply<bool> = self
            .caller
            .call("approveRequest", &serde_json::json!({ "queryId": query_id }))
            .await?;
        reply.into_result()
    }

    pub async fn reject_request(&self, query_id: u64) -> ClientResult<String> {
        let reply: CanisterReply<String> = self
            .caller
            .call("rejectRequest", &serde_json::json!({ "queryId": query_id }))
            .await?;
        reply.into_result()
    }

    pub async fn get_owner(&self) -> ClientResult<Principal> {
        self.caller.call("getOwner", &serde_json::json!({})).await
    }

    pub async fn has_data(&self) -> ClientResult<bool> {
        self.caller.call("hasData", &serde_json::json!({})).await
    }

    pub async fn get_data_count(&self) -> ClientResult<u64> {
        self.caller.call("getDataCount", &serde_json::json!({})).await
    }

    pub async fn get_vault_stats(&self) -> ClientResult<VaultStats> {
        let reply: CanisterReply<VaultStats> = self
            .caller
            .call("getVaultStats", &serde_json::json!({}))
            .await?;
        reply.into_result()
    }

    /// Access log entries, newest first; `limit` caps the count.
    pub async fn get_access_logs(&self, limit: Option<u64>) -> ClientResult<Vec<AccessLog>> {
        let reply: CanisterReply<Vec<AccessLog>> = self
            .caller
            .call("getAccessLogs", &serde_json::json!({ "limit": limit }))
            .await?;
        reply.into_result()
    }

    pub async fn health_check(&self) -> ClientResult<VaultHealth> {
        self.caller.call("healthCheck", &serde_json::json!({})).await
    }
}
