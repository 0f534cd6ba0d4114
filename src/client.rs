//! Identity Client
//!
//! High-level client exposing one operation per identity-provider endpoint.

use std::sync::Arc;

use crate::core::discovery::ProviderMetadataCache;
use crate::core::fetch::fetch_json;
use crate::core::pipeline::AuthenticatedPipeline;
use crate::core::transport::{HttpRequest, HttpTransport, ReqwestHttpTransport};
use crate::envelope::decode_envelope;
use crate::error::IdpResult;
use crate::session::SessionDelegate;
use crate::types::{
    AppSessionToken, ChallengeToken, ClientConfig, ProviderMetadata, TokenRequestParams,
    TokenResult, UserInfo,
};

/// Identity-provider client.
///
/// Holds the provider metadata cache and the authenticated request pipeline;
/// all state is instance-scoped. Operations needing a discovered endpoint
/// (token exchange, user info, revocation) resolve metadata first; challenge,
/// app-session-token, and the SSO callback relay target fixed paths under the
/// configured base endpoint.
pub struct IdpClient<T: HttpTransport = ReqwestHttpTransport> {
    config: ClientConfig,
    transport: Arc<T>,
    discovery: ProviderMetadataCache<T>,
    pipeline: AuthenticatedPipeline<T>,
}

impl IdpClient<ReqwestHttpTransport> {
    /// Create a client with the default reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(
            config.clone(),
            ReqwestHttpTransport::with_timeout(config.timeout),
        )
    }
}

impl<T: HttpTransport> IdpClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let transport = Arc::new(transport);
        let discovery = ProviderMetadataCache::new(transport.clone(), config.discovery_url());
        let pipeline = AuthenticatedPipeline::new(transport.clone());
        Self {
            config,
            transport,
            discovery,
            pipeline,
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Attach the session delegate (non-owning; the caller keeps ownership).
    pub fn set_delegate(&self, delegate: &Arc<dyn SessionDelegate>) {
        self.pipeline.set_delegate(delegate);
    }

    /// Resolve the discovered provider metadata (cached after first use).
    pub async fn provider_metadata(&self) -> IdpResult<ProviderMetadata> {
        self.discovery.get().await
    }

    /// Exchange a grant for tokens at the discovered token endpoint.
    ///
    /// Does not go through the authenticated pipeline: token exchange itself
    /// obtains the credential, so it cannot require one.
    pub async fn request_token(&self, params: TokenRequestParams) -> IdpResult<TokenResult> {
        let metadata = self.discovery.get().await?;

        let mut pairs: Vec<(&str, &str)> = vec![
            ("client_id", self.config.client_id.as_str()),
            ("grant_type", params.grant_type.as_str()),
        ];
        // Absent parameters are omitted, never sent empty.
        if let Some(code) = params.code.as_deref() {
            pairs.push(("code", code));
        }
        if let Some(redirect_uri) = params.redirect_uri.as_deref() {
            pairs.push(("redirect_uri", redirect_uri));
        }
        if let Some(code_verifier) = params.code_verifier.as_deref() {
            pairs.push(("code_verifier", code_verifier));
        }
        if let Some(refresh_token) = params.refresh_token.as_deref() {
            pairs.push(("refresh_token", refresh_token));
        }
        if let Some(jwt) = params.jwt.as_deref() {
            pairs.push(("jwt", jwt));
        }

        let request = HttpRequest::post(&metadata.token_endpoint).with_form_body(&pairs);
        fetch_json(self.transport.as_ref(), request).await
    }

    /// Fetch userinfo claims with the given access token.
    ///
    /// Claims are decoded with exact provider field names.
    pub async fn request_user_info(&self, access_token: &str) -> IdpResult<UserInfo> {
        let metadata = self.discovery.get().await?;

        let request = HttpRequest::get(&metadata.userinfo_endpoint).with_bearer_token(access_token);
        fetch_json(self.transport.as_ref(), request).await
    }

    /// Revoke a refresh token at the discovered revocation endpoint.
    ///
    /// Any 2xx response is success; the payload is discarded.
    pub async fn request_revocation(&self, refresh_token: &str) -> IdpResult<()> {
        let metadata = self.discovery.get().await?;

        let request = HttpRequest::post(&metadata.revocation_endpoint)
            .with_form_body(&[("token", refresh_token)]);
        self.transport.send(request).await?;
        Ok(())
    }

    /// Request a short-lived proof-of-possession challenge.
    pub async fn request_challenge(&self, purpose: &str) -> IdpResult<ChallengeToken> {
        let request = HttpRequest::post(self.config.endpoint_url("oauth2/challenge"))
            .with_json_body(&serde_json::json!({ "purpose": purpose }))?;

        let response = self.pipeline.send(request).await?;
        decode_envelope(&response.body)
    }

    /// Exchange a refresh token for an application session token.
    pub async fn request_app_session_token(
        &self,
        refresh_token: &str,
    ) -> IdpResult<AppSessionToken> {
        let request = HttpRequest::post(self.config.endpoint_url("oauth2/app_session_token"))
            .with_json_body(&serde_json::json!({ "refresh_token": refresh_token }))?;

        let response = self.pipeline.send(request).await?;
        decode_envelope(&response.body)
    }

    /// Relay a third-party SSO authorization callback to the provider.
    ///
    /// Success is presence-agnostic; the body is discarded.
    pub async fn request_sso_callback(&self, code: &str, state: &str) -> IdpResult<()> {
        let request = HttpRequest::post(self.config.endpoint_url("sso/wechat/callback"))
            .with_form_body(&[("code", code), ("state", state), ("x_platform", "ios")]);

        self.transport.send(request).await?;
        Ok(())
    }
}
