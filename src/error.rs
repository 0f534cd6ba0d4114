//! Error Types
//!
//! Error taxonomy for identity-provider client operations.

use serde::Deserialize;
use thiserror::Error;

/// Root error type for identity-provider operations.
///
/// The taxonomy is flat and non-retrying: every component surfaces failures
/// upward unchanged, and any retry policy belongs to the caller.
#[derive(Error, Debug)]
pub enum IdpError {
    /// No structured HTTP response was obtainable (the underlying call failed
    /// before producing a response).
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Transport-level failure on an otherwise 2xx-classified attempt, e.g.
    /// the body could not be read after a successful status.
    #[error("transport failure: {message}")]
    DataTask { message: String },

    /// Response body did not match the expected JSON shape.
    #[error("decode failure: {message}")]
    Decode { message: String },

    /// The `error` branch of a response envelope.
    #[error("server error: {0}")]
    Server(ServerErrorDetail),

    /// Non-2xx status whose body did not parse as a provider error.
    #[error("unexpected status {status}")]
    Status { status: u16, body: Vec<u8> },

    /// Non-2xx status whose body parsed as the OAuth-standard
    /// `{error, error_description}` shape.
    #[error("oidc error: {0}")]
    Oidc(ProviderErrorDetail),

    /// Configuration error (construction-time only).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl IdpError {
    /// Create an invalid-response error from an underlying cause.
    pub fn invalid_response(cause: impl std::fmt::Display) -> Self {
        Self::InvalidResponse {
            message: cause.to_string(),
        }
    }

    /// Create a transport error from an underlying cause.
    pub fn data_task(cause: impl std::fmt::Display) -> Self {
        Self::DataTask {
            message: cause.to_string(),
        }
    }

    /// Create a decode error from an underlying cause.
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: cause.to_string(),
        }
    }

    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidResponse { .. } => "IDP_INVALID_RESPONSE",
            Self::DataTask { .. } => "IDP_TRANSPORT",
            Self::Decode { .. } => "IDP_DECODE",
            Self::Server(_) => "IDP_SERVER",
            Self::Status { .. } => "IDP_STATUS",
            Self::Oidc(_) => "IDP_OIDC",
            Self::Config(_) => "IDP_CONFIG",
        }
    }

    /// Check if the failure is worth retrying by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidResponse { .. } | Self::DataTask { .. } => true,
            Self::Status { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }

    /// Check if the failure requires the user to re-authenticate.
    pub fn needs_reauth(&self) -> bool {
        match self {
            Self::Oidc(detail) => detail.error == "invalid_grant",
            Self::Status { status, .. } => *status == 401,
            _ => false,
        }
    }
}

/// Structured error emitted by the identity service under the `error`
/// envelope key.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerErrorDetail {
    pub name: String,
    pub message: String,
    pub reason: String,
    #[serde(default)]
    pub info: Option<serde_json::Map<String, serde_json::Value>>,
}

impl std::fmt::Display for ServerErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.reason, self.message)
    }
}

/// OAuth-standard error shape emitted directly on non-2xx token-endpoint
/// responses. Distinct envelope from [`ServerErrorDetail`].
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderErrorDetail {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl std::fmt::Display for ProviderErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{}: {}", self.error, description),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingRequired { field: String },

    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },
}

/// Result type for identity-provider operations.
pub type IdpResult<T> = Result<T, IdpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(IdpError::data_task("connection reset").is_retryable());
        assert!(IdpError::Status {
            status: 503,
            body: Vec::new()
        }
        .is_retryable());
        assert!(!IdpError::Status {
            status: 404,
            body: Vec::new()
        }
        .is_retryable());
        assert!(!IdpError::decode("bad shape").is_retryable());
    }

    #[test]
    fn test_needs_reauth() {
        let err = IdpError::Oidc(ProviderErrorDetail {
            error: "invalid_grant".to_string(),
            error_description: None,
        });
        assert!(err.needs_reauth());

        let err = IdpError::Oidc(ProviderErrorDetail {
            error: "invalid_request".to_string(),
            error_description: None,
        });
        assert!(!err.needs_reauth());

        assert!(IdpError::Status {
            status: 401,
            body: Vec::new()
        }
        .needs_reauth());
    }

    #[test]
    fn test_provider_error_display() {
        let detail = ProviderErrorDetail {
            error: "invalid_grant".to_string(),
            error_description: Some("token expired".to_string()),
        };
        assert_eq!(detail.to_string(), "invalid_grant: token expired");
    }

    #[test]
    fn test_server_error_detail_parsing() {
        let json = r#"{
            "name": "ChallengeExpired",
            "message": "the challenge is no longer valid",
            "reason": "expired",
            "info": {"retryable": true}
        }"#;

        let detail: ServerErrorDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.name, "ChallengeExpired");
        assert_eq!(detail.reason, "expired");
        assert!(detail.info.is_some());
    }
}
