//! HTTP Transport
//!
//! HTTP client interface and response classification for identity-provider
//! requests.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{IdpError, IdpResult, ProviderErrorDetail};

/// HTTP request definition.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Set a header (lowercase name).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Set a bearer credential on the authorization header.
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("authorization", format!("Bearer {token}"))
    }

    /// Set an `application/x-www-form-urlencoded` body from key/value pairs.
    pub fn with_form_body(mut self, pairs: &[(&str, &str)]) -> Self {
        let body = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.body = Some(body.into_bytes());
        self.with_header("content-type", "application/x-www-form-urlencoded")
    }

    /// Set an `application/json` body from a serializable value.
    pub fn with_json_body<T: Serialize>(mut self, value: &T) -> IdpResult<Self> {
        let body = serde_json::to_vec(value).map_err(IdpError::decode)?;
        self.body = Some(body);
        Ok(self.with_header("content-type", "application/json"))
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Classified 2xx response: raw bytes plus response metadata.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code (always within [200, 300)).
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// HTTP transport interface (for dependency injection).
///
/// `send` returns only classified successes; every other outcome is one of
/// the typed failures (see [`classify_response`] for the status rules).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and classify the outcome.
    async fn send(&self, request: HttpRequest) -> IdpResult<HttpResponse>;
}

/// Classify a raw status/headers/body triple per the provider's conventions.
///
/// Non-2xx statuses are reported as a provider error when the body parses as
/// the OAuth `{error, error_description}` shape, otherwise as a plain status
/// failure carrying the raw body. This runs before any transport-error
/// consideration, so a non-2xx status always wins over a body-read fault.
pub fn classify_response(
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
) -> IdpResult<HttpResponse> {
    if !(200..300).contains(&status) {
        if let Ok(detail) = serde_json::from_slice::<ProviderErrorDetail>(&body) {
            return Err(IdpError::Oidc(detail));
        }
        return Err(IdpError::Status { status, body });
    }

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Default reqwest-based HTTP transport.
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl ReqwestHttpTransport {
    /// Create new transport with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create transport with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none()) // Don't follow redirects for OAuth2
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_timeout: timeout,
        }
    }
}

impl Default for ReqwestHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn send(&self, request: HttpRequest) -> IdpResult<HttpResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        req_builder = req_builder.timeout(timeout);

        tracing::debug!(method = request.method.as_str(), url = %request.url, "dispatching request");

        // No structured response at all: the call failed before producing one.
        let response = req_builder
            .send()
            .await
            .map_err(IdpError::invalid_response)?;

        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string().to_lowercase(), v.to_string());
            }
        }

        if !(200..300).contains(&status) {
            // Status classification wins over a body-read fault.
            let body = response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            return classify_response(status, headers, body);
        }

        let body = response
            .bytes()
            .await
            .map_err(IdpError::data_task)?
            .to_vec();

        classify_response(status, headers, body)
    }
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: std::sync::Mutex<Vec<(u16, Vec<u8>)>>,
    request_history: std::sync::Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response to return (classified on send).
    pub fn queue_response(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.responses.lock().unwrap().push((status, body.into()));
        self
    }

    /// Queue a JSON response.
    pub fn queue_json_response<T: serde::Serialize>(&self, status: u16, body: &T) -> &Self {
        self.queue_response(status, serde_json::to_vec(body).unwrap())
    }

    /// Get request history.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        self.request_history.lock().unwrap().clone()
    }

    /// Get last request.
    pub fn get_last_request(&self) -> Option<HttpRequest> {
        self.request_history.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> IdpResult<HttpResponse> {
        self.request_history.lock().unwrap().push(request);

        let queued = self.responses.lock().unwrap().pop();
        match queued {
            Some((status, body)) => classify_response(status, HashMap::new(), body),
            None => Err(IdpError::invalid_response("no mock response available")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_error_body_classifies_as_oidc() {
        let body = br#"{"error":"invalid_grant","error_description":"x"}"#.to_vec();

        let err = classify_response(401, HashMap::new(), body).unwrap_err();
        match err {
            IdpError::Oidc(detail) => {
                assert_eq!(detail.error, "invalid_grant");
                assert_eq!(detail.error_description, Some("x".to_string()));
            }
            other => panic!("expected oidc error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body_classifies_as_status() {
        let body = b"gateway exploded".to_vec();

        let err = classify_response(500, HashMap::new(), body.clone()).unwrap_err();
        match err {
            IdpError::Status { status, body: raw } => {
                assert_eq!(status, 500);
                assert_eq!(raw, body);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_2xx_passes_through() {
        let response = classify_response(204, HashMap::new(), Vec::new()).unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_form_body_encoding() {
        let request = HttpRequest::post("https://id.example.com/token")
            .with_form_body(&[("grant_type", "refresh_token"), ("refresh_token", "r 1")]);

        let body = String::from_utf8(request.body.unwrap()).unwrap();
        assert_eq!(body, "grant_type=refresh_token&refresh_token=r%201");
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(200, &serde_json::json!({"key": "value"}));

        let request = HttpRequest::get("https://id.example.com/userinfo")
            .with_bearer_token("tok");
        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 200);

        let history = transport.get_requests();
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].headers.get("authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn test_mock_transport_exhausted_is_invalid_response() {
        let transport = MockHttpTransport::new();
        let err = transport
            .send(HttpRequest::get("https://id.example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, IdpError::InvalidResponse { .. }));
    }
}
