//! Provider Metadata Types
//!
//! OIDC discovery document as served from
//! `/.well-known/openid-configuration`.

use serde::Deserialize;

/// Discovered provider metadata.
///
/// Immutable once obtained; the client fetches it at most once per instance
/// lifetime (see [`crate::core::discovery::ProviderMetadataCache`]).
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderMetadata {
    /// Issuer identifier.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Token endpoint URL.
    pub token_endpoint: String,
    /// Userinfo endpoint URL.
    pub userinfo_endpoint: String,
    /// Token revocation endpoint URL.
    pub revocation_endpoint: String,
    /// Authorization endpoint (unused by this core, kept for completeness).
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    /// JWKS URI.
    #[serde(default)]
    pub jwks_uri: Option<String>,
}
