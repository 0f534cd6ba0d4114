//! OIDC Discovery
//!
//! Fetches and memoizes provider metadata for the lifetime of the client
//! instance.

use std::sync::{Arc, Mutex};

use crate::core::fetch::fetch_json;
use crate::core::transport::{HttpRequest, HttpTransport};
use crate::error::IdpResult;
use crate::types::ProviderMetadata;

/// Instance-scoped provider metadata cache.
///
/// A successful fetch is cached unconditionally for the remainder of the
/// instance's lifetime, with no TTL or revalidation. A failed fetch is not
/// cached; the next call retries. Concurrent first-time calls may both miss
/// and issue redundant fetches; each independently populates the cache and
/// the last writer wins, which is harmless because the value is the same.
pub struct ProviderMetadataCache<T: HttpTransport> {
    transport: Arc<T>,
    discovery_url: String,
    cached: Mutex<Option<ProviderMetadata>>,
}

impl<T: HttpTransport> ProviderMetadataCache<T> {
    /// Create a cache targeting the given discovery URL.
    pub fn new(transport: Arc<T>, discovery_url: String) -> Self {
        Self {
            transport,
            discovery_url,
            cached: Mutex::new(None),
        }
    }

    /// Get the provider metadata, fetching it on first use.
    pub async fn get(&self) -> IdpResult<ProviderMetadata> {
        if let Some(metadata) = self.cached.lock().unwrap().clone() {
            tracing::debug!("provider metadata cache hit");
            return Ok(metadata);
        }

        tracing::debug!(url = %self.discovery_url, "fetching provider metadata");
        let metadata: ProviderMetadata = fetch_json(
            self.transport.as_ref(),
            HttpRequest::get(&self.discovery_url).with_header("accept", "application/json"),
        )
        .await?;

        *self.cached.lock().unwrap() = Some(metadata.clone());
        Ok(metadata)
    }
}
