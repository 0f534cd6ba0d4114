//! Token Types
//!
//! Token-exchange request parameters and results.

use serde::{Deserialize, Serialize};

/// OAuth grant type supported by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantType {
    #[serde(rename = "authorization_code")]
    AuthorizationCode,
    #[serde(rename = "refresh_token")]
    RefreshToken,
    #[serde(rename = "anonymous")]
    Anonymous,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
            Self::Anonymous => "anonymous",
        }
    }
}

/// Parameters for a token-exchange request.
///
/// Absent optional fields are omitted from the form body, never sent empty.
#[derive(Clone, Debug)]
pub struct TokenRequestParams {
    pub grant_type: GrantType,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub code_verifier: Option<String>,
    pub refresh_token: Option<String>,
    pub jwt: Option<String>,
}

impl TokenRequestParams {
    /// Parameters for exchanging an authorization code (with PKCE verifier).
    pub fn authorization_code(
        code: impl Into<String>,
        redirect_uri: impl Into<String>,
        code_verifier: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: GrantType::AuthorizationCode,
            code: Some(code.into()),
            redirect_uri: Some(redirect_uri.into()),
            code_verifier: Some(code_verifier.into()),
            refresh_token: None,
            jwt: None,
        }
    }

    /// Parameters for refreshing an access token.
    pub fn refresh(refresh_token: impl Into<String>) -> Self {
        Self {
            grant_type: GrantType::RefreshToken,
            code: None,
            redirect_uri: None,
            code_verifier: None,
            refresh_token: Some(refresh_token.into()),
            jwt: None,
        }
    }

    /// Parameters for an anonymous grant backed by a proof JWT.
    pub fn anonymous(jwt: impl Into<String>) -> Self {
        Self {
            grant_type: GrantType::Anonymous,
            code: None,
            redirect_uri: None,
            code_verifier: None,
            refresh_token: None,
            jwt: Some(jwt.into()),
        }
    }
}

/// Token response from the token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResult {
    /// ID token (OIDC).
    #[serde(default)]
    pub id_token: Option<String>,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// Access token.
    pub access_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}
