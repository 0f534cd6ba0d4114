//! Configuration Types
//!
//! Client configuration for the identity-provider endpoint.

use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Identity-provider client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base endpoint of the identity provider.
    pub endpoint: Url,
    /// OAuth client identifier.
    pub client_id: String,
    /// HTTP timeout for every operation.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a URL for a fixed path under the base endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Discovery URL for this provider.
    pub fn discovery_url(&self) -> String {
        self.endpoint_url(".well-known/openid-configuration")
    }
}

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration builder.
#[derive(Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    client_id: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider base endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the OAuth client identifier.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let endpoint = self.endpoint.ok_or_else(|| ConfigError::MissingRequired {
            field: "endpoint".to_string(),
        })?;
        let endpoint = Url::parse(&endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint { url: endpoint })?;

        let client_id = self.client_id.ok_or_else(|| ConfigError::MissingRequired {
            field: "client_id".to_string(),
        })?;
        if client_id.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "client_id".to_string(),
            });
        }

        Ok(ClientConfig {
            endpoint,
            client_id,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Create a new client configuration builder.
pub fn client_config() -> ClientConfigBuilder {
    ClientConfigBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid() {
        let config = client_config()
            .endpoint("https://id.example.com")
            .client_id("app-1")
            .build()
            .unwrap();

        assert_eq!(config.client_id, "app-1");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_missing_client_id() {
        let result = client_config().endpoint("https://id.example.com").build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field }) if field == "client_id"
        ));
    }

    #[test]
    fn test_builder_invalid_endpoint() {
        let result = client_config()
            .endpoint("not a url")
            .client_id("app-1")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_endpoint_url_joining() {
        let config = client_config()
            .endpoint("https://id.example.com/")
            .client_id("app-1")
            .build()
            .unwrap();

        assert_eq!(
            config.endpoint_url("oauth2/challenge"),
            "https://id.example.com/oauth2/challenge"
        );
        assert_eq!(
            config.discovery_url(),
            "https://id.example.com/.well-known/openid-configuration"
        );
    }
}
