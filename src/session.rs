//! Session Delegate
//!
//! Capability interface to the credential/session owner. The client never
//! decides refresh policy or persists tokens; it only consults this interface
//! and reacts to its outcome.

use async_trait::async_trait;

use crate::error::IdpResult;

/// External credential/session delegate.
///
/// The delegate's lifetime is owned by the caller; the client holds only a
/// non-owning handle (see
/// [`AuthenticatedPipeline`](crate::core::pipeline::AuthenticatedPipeline)).
#[async_trait]
pub trait SessionDelegate: Send + Sync {
    /// Current access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Whether the current access token should be refreshed before use.
    fn should_refresh_access_token(&self) -> bool;

    /// Perform a refresh; failure propagates to the pending operation as-is.
    async fn refresh_access_token(&self) -> IdpResult<()>;
}

/// Mock session delegate for testing.
#[derive(Default)]
pub struct MockSessionDelegate {
    token: std::sync::Mutex<Option<String>>,
    should_refresh: std::sync::Mutex<bool>,
    refreshed_token: std::sync::Mutex<Option<String>>,
    refresh_error: std::sync::Mutex<Option<crate::error::IdpError>>,
    refresh_count: std::sync::Mutex<usize>,
}

impl MockSessionDelegate {
    /// Create new mock delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current access token.
    pub fn set_token(&self, token: impl Into<String>) -> &Self {
        *self.token.lock().unwrap() = Some(token.into());
        self
    }

    /// Mark the token as needing refresh; `refreshed` becomes the token after
    /// a successful refresh.
    pub fn set_needs_refresh(&self, refreshed: impl Into<String>) -> &Self {
        *self.should_refresh.lock().unwrap() = true;
        *self.refreshed_token.lock().unwrap() = Some(refreshed.into());
        self
    }

    /// Make the next refresh fail.
    pub fn set_refresh_error(&self, error: crate::error::IdpError) -> &Self {
        *self.should_refresh.lock().unwrap() = true;
        *self.refresh_error.lock().unwrap() = Some(error);
        self
    }

    /// Number of refreshes performed.
    pub fn refresh_count(&self) -> usize {
        *self.refresh_count.lock().unwrap()
    }
}

#[async_trait]
impl SessionDelegate for MockSessionDelegate {
    fn access_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn should_refresh_access_token(&self) -> bool {
        *self.should_refresh.lock().unwrap()
    }

    async fn refresh_access_token(&self) -> IdpResult<()> {
        *self.refresh_count.lock().unwrap() += 1;

        if let Some(error) = self.refresh_error.lock().unwrap().take() {
            return Err(error);
        }

        *self.should_refresh.lock().unwrap() = false;
        if let Some(refreshed) = self.refreshed_token.lock().unwrap().take() {
            *self.token.lock().unwrap() = Some(refreshed);
        }
        Ok(())
    }
}
