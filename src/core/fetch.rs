//! Typed Fetch
//!
//! JSON decoding layered on top of the HTTP transport.

use serde::de::DeserializeOwned;

use crate::core::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::{IdpError, IdpResult};

/// Send a request and decode the 2xx body as JSON into `T`.
///
/// Wire fields are snake_case and map onto the typed structs via their serde
/// derives; a malformed or shape-mismatched body is reported as a decode
/// failure, distinct from transport or status failures.
pub async fn fetch_json<T, C>(transport: &C, request: HttpRequest) -> IdpResult<T>
where
    T: DeserializeOwned,
    C: HttpTransport + ?Sized,
{
    let response = transport.send(request).await?;
    decode_body(&response)
}

/// Decode a classified response body as JSON into `T`.
pub fn decode_body<T: DeserializeOwned>(response: &HttpResponse) -> IdpResult<T> {
    serde_json::from_slice(&response.body).map_err(IdpError::decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::MockHttpTransport;
    use crate::types::TokenResult;

    #[tokio::test]
    async fn test_fetch_decodes_typed_payload() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(
            200,
            &serde_json::json!({
                "token_type": "Bearer",
                "access_token": "a1",
                "expires_in": 3600
            }),
        );

        let result: TokenResult = fetch_json(
            &transport,
            HttpRequest::post("https://id.example.com/token"),
        )
        .await
        .unwrap();

        assert_eq!(result.access_token, "a1");
        assert_eq!(result.token_type, "Bearer");
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(200, &serde_json::json!({"unexpected": true}));

        let err = fetch_json::<TokenResult, _>(
            &transport,
            HttpRequest::post("https://id.example.com/token"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, IdpError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_status_failure_is_not_decode_error() {
        let transport = MockHttpTransport::new();
        transport.queue_response(500, b"boom".to_vec());

        let err = fetch_json::<TokenResult, _>(
            &transport,
            HttpRequest::post("https://id.example.com/token"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, IdpError::Status { status: 500, .. }));
    }
}
