//! Identity Types
//!
//! Payloads returned by the auxiliary identity operations.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Decoded userinfo claims.
///
/// Claim keys are provider-defined, so they are preserved exactly as sent
/// with no field-naming translation applied.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct UserInfo {
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    /// The `sub` claim, if present.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(|v| v.as_str())
    }

    /// Look up a claim by its exact provider name.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.claims.get(name)
    }
}

/// Short-lived proof-of-possession challenge.
#[derive(Clone, Debug, Deserialize)]
pub struct ChallengeToken {
    pub token: String,
    pub expire_at: String,
}

impl ChallengeToken {
    /// Parse the `expire_at` timestamp string, if well-formed.
    pub fn expire_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expire_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Application session token exchanged for a refresh token.
#[derive(Clone, Debug, Deserialize)]
pub struct AppSessionToken {
    pub app_session_token: String,
    pub expire_at: String,
}

impl AppSessionToken {
    /// Parse the `expire_at` timestamp string, if well-formed.
    pub fn expire_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expire_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
