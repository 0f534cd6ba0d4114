//! Identity Provider Client Module
//!
//! OAuth2/OIDC client core for authenticating end users against a remote
//! identity provider: provider metadata discovery, grant-specific token
//! exchange, transparent pre-request refresh through a session delegate, and
//! the auxiliary identity operations (challenge issuance, app-session-token
//! exchange, SSO callback relay).
//!
//! # Features
//!
//! - OIDC Discovery with instance-lifetime memoization (RFC 8414)
//! - Token exchange for authorization_code / refresh_token / anonymous grants
//! - Userinfo with exact provider claim names
//! - Token Revocation (RFC 7009)
//! - Challenge and app-session-token envelope operations
//! - Authenticated request pipeline over a non-owning session delegate
//! - Blocking bridge for synchronous call sites
//!
//! # Example
//!
//! ```rust,ignore
//! use idp_client::{client_config, IdpClient, TokenRequestParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = client_config()
//!         .endpoint("https://id.example.com")
//!         .client_id("my-client-id")
//!         .build()?;
//!
//!     let client = IdpClient::new(config);
//!
//!     let tokens = client
//!         .request_token(TokenRequestParams::refresh("stored-refresh-token"))
//!         .await?;
//!     println!("access token expires in {}s", tokens.expires_in);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, provider metadata, and payload types
//! - `error`: flat failure taxonomy shared by every layer
//! - `envelope`: the provider's `result`/`error` response envelope
//! - `core`: transport, typed fetch, discovery cache, authenticated pipeline
//! - `session`: capability interface to the external credential owner
//! - `client`: one operation per identity-provider endpoint
//! - `blocking`: sync bridge over callback-style completion

pub mod blocking;
pub mod client;
pub mod core;
pub mod envelope;
pub mod error;
pub mod session;
pub mod types;

// Re-export main client
pub use client::IdpClient;

// Re-export errors
pub use error::{ConfigError, IdpError, IdpResult, ProviderErrorDetail, ServerErrorDetail};

// Re-export envelope
pub use envelope::{decode_envelope, ResponseEnvelope};

// Re-export types
pub use types::{
    // Config
    client_config, ClientConfig, ClientConfigBuilder,
    // Metadata
    ProviderMetadata,
    // Token
    GrantType, TokenRequestParams, TokenResult,
    // Identity
    AppSessionToken, ChallengeToken, UserInfo,
};

// Re-export core components
pub use core::{
    AuthenticatedPipeline, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    MockHttpTransport, ProviderMetadataCache, ReqwestHttpTransport,
};

// Re-export session delegate
pub use session::{MockSessionDelegate, SessionDelegate};

// Re-export sync bridge
pub use blocking::{block_on_operation, wait_for, Completion};
