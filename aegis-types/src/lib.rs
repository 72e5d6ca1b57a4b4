//! Shared types for the Aegis Vault client core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The well-known anonymous principal. Requests under this identity carry
/// no user authority and must never be treated as an authenticated session.
pub const ANONYMOUS_PRINCIPAL: &str = "2vxsx-fae";

/// Opaque identifier for an authenticated user identity.
///
/// The textual representation is treated as canonical; the client never
/// inspects its internal structure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from its textual form.
    ///
    /// Returns `None` for an empty or whitespace-only string.
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The anonymous principal.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_PRINCIPAL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the anonymous principal.
    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_PRINCIPAL
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
