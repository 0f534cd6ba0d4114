//! Authenticated Request Pipeline
//!
//! Consults the session delegate before dispatching a request that carries a
//! bearer credential: refresh first if the delegate asks for it, then attach
//! the (possibly refreshed) token.

use std::sync::{Arc, Mutex, Weak};

use crate::core::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::IdpResult;
use crate::session::SessionDelegate;

/// Pipeline attaching bearer credentials via a non-owning delegate handle.
///
/// The delegate is held weakly: the pipeline never extends its lifetime, and
/// once the delegate is gone requests go out unauthenticated rather than
/// failing. Refresh-then-attach-then-send is serialized within one call only;
/// two concurrent calls may both trigger a refresh.
pub struct AuthenticatedPipeline<T: HttpTransport> {
    transport: Arc<T>,
    delegate: Mutex<Option<Weak<dyn SessionDelegate>>>,
}

impl<T: HttpTransport> AuthenticatedPipeline<T> {
    /// Create a pipeline with no delegate attached.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            delegate: Mutex::new(None),
        }
    }

    /// Attach the session delegate (non-owning).
    pub fn set_delegate(&self, delegate: &Arc<dyn SessionDelegate>) {
        *self.delegate.lock().unwrap() = Some(Arc::downgrade(delegate));
    }

    fn delegate(&self) -> Option<Arc<dyn SessionDelegate>> {
        self.delegate.lock().unwrap().as_ref().and_then(Weak::upgrade)
    }

    /// Send a request with the current bearer credential attached.
    pub async fn send(&self, request: HttpRequest) -> IdpResult<HttpResponse> {
        let mut request = request;

        if let Some(delegate) = self.delegate() {
            if delegate.should_refresh_access_token() {
                tracing::debug!("refreshing access token before request");
                delegate.refresh_access_token().await?;
            }
            if let Some(token) = delegate.access_token() {
                request = request.with_bearer_token(&token);
            }
        }

        self.transport.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::MockHttpTransport;
    use crate::error::IdpError;
    use crate::session::MockSessionDelegate;

    fn pipeline_with(
        transport: Arc<MockHttpTransport>,
    ) -> (AuthenticatedPipeline<MockHttpTransport>, Arc<MockSessionDelegate>) {
        let pipeline = AuthenticatedPipeline::new(transport);
        let delegate = Arc::new(MockSessionDelegate::new());
        let handle: Arc<dyn SessionDelegate> = delegate.clone();
        pipeline.set_delegate(&handle);
        (pipeline, delegate)
    }

    #[tokio::test]
    async fn test_attaches_current_token() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(200, &serde_json::json!({}));
        let (pipeline, delegate) = pipeline_with(transport.clone());
        delegate.set_token("t1");

        pipeline
            .send(HttpRequest::get("https://id.example.com/resource"))
            .await
            .unwrap();

        let request = transport.get_last_request().unwrap();
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Bearer t1")
        );
        assert_eq!(delegate.refresh_count(), 0);
    }

    #[tokio::test]
    async fn test_refreshes_before_attaching() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(200, &serde_json::json!({}));
        let (pipeline, delegate) = pipeline_with(transport.clone());
        delegate.set_token("stale");
        delegate.set_needs_refresh("fresh");

        pipeline
            .send(HttpRequest::get("https://id.example.com/resource"))
            .await
            .unwrap();

        assert_eq!(delegate.refresh_count(), 1);
        let request = transport.get_last_request().unwrap();
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Bearer fresh")
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates_without_sending() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(200, &serde_json::json!({}));
        let (pipeline, delegate) = pipeline_with(transport.clone());
        delegate.set_refresh_error(IdpError::data_task("refresh backend down"));

        let err = pipeline
            .send(HttpRequest::get("https://id.example.com/resource"))
            .await
            .unwrap_err();

        assert!(matches!(err, IdpError::DataTask { .. }));
        assert!(transport.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_no_token_sends_unauthenticated() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(200, &serde_json::json!({}));
        let (pipeline, _delegate) = pipeline_with(transport.clone());

        pipeline
            .send(HttpRequest::get("https://id.example.com/resource"))
            .await
            .unwrap();

        let request = transport.get_last_request().unwrap();
        assert!(!request.headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_released_delegate_sends_unauthenticated() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(200, &serde_json::json!({}));
        let pipeline = AuthenticatedPipeline::new(transport.clone());

        {
            let delegate = Arc::new(MockSessionDelegate::new());
            delegate.set_token("t1").set_needs_refresh("t2");
            let handle: Arc<dyn SessionDelegate> = delegate;
            pipeline.set_delegate(&handle);
            // `handle` dropped here; pipeline must not keep it alive.
        }

        pipeline
            .send(HttpRequest::get("https://id.example.com/resource"))
            .await
            .unwrap();

        let request = transport.get_last_request().unwrap();
        assert!(!request.headers.contains_key("authorization"));
    }
}
