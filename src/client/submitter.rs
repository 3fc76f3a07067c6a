//! Document submission client.

use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use super::payload;
use super::transport::{HttpTransport, Transport, TransportResponse};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::ratelimit::SlidingWindowLimiter;

/// Default registration service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ismp.crpt.ru/api/v3";

/// Client that submits documents to the registration service.
///
/// Every submission first claims a slot from the sliding window limiter,
/// suspending the caller while the window is saturated. The submitter owns
/// its limiter, transport, and endpoint for its full lifetime and can be
/// shared across tasks behind an `Arc`.
pub struct DocumentSubmitter<T: Transport = HttpTransport> {
    /// Admission control for outgoing submissions
    limiter: SlidingWindowLimiter,
    /// The HTTP transport (or a test double)
    transport: T,
    /// Endpoint receiving the submissions
    base_url: String,
}

impl DocumentSubmitter<HttpTransport> {
    /// Create a submitter against the default registration endpoint.
    pub fn new(window: Duration, limit: usize) -> Result<Self> {
        Self::with_base_url(window, limit, DEFAULT_BASE_URL)
    }

    /// Create a submitter against a specific endpoint.
    pub fn with_base_url(
        window: Duration,
        limit: usize,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_transport(window, limit, base_url, HttpTransport::new())
    }

    /// Create a submitter from a loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::with_base_url(
            config.window_unit.duration(),
            config.requests_per_window,
            config.base_url.clone(),
        )
    }
}

impl<T: Transport> DocumentSubmitter<T> {
    /// Create a submitter with a custom transport.
    pub fn with_transport(
        window: Duration,
        limit: usize,
        base_url: impl Into<String>,
        transport: T,
    ) -> Result<Self> {
        Ok(Self {
            limiter: SlidingWindowLimiter::new(window, limit)?,
            transport,
            base_url: base_url.into(),
        })
    }

    /// The limiter guarding this submitter.
    pub fn limiter(&self) -> &SlidingWindowLimiter {
        &self.limiter
    }

    /// The endpoint this submitter posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one document with its detached signature.
    ///
    /// Validates the arguments, waits for an admission slot, then POSTs
    /// `{"document": ..., "signature": ...}` as JSON to the base URL. The
    /// response status and body are returned unmodified.
    ///
    /// Invalid arguments are rejected before a slot is claimed, so no
    /// capacity is consumed and no network call is made. Transport failures
    /// are surfaced without retrying; the slot claimed for a failed call is
    /// not returned.
    pub async fn submit(&self, document: &Value, signature: &str) -> Result<TransportResponse> {
        payload::validate(document, signature)?;

        self.limiter.acquire().await;

        let body = payload::build_payload(document, signature)?;
        debug!(
            url = %self.base_url,
            bytes = body.len(),
            "Submitting document"
        );

        let headers = HashMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);

        let response = self.transport.send(&self.base_url, &headers, body).await?;

        info!(status = response.status, "Document submission completed");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocgateError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::time::Instant;

    type RecordedCall = (String, HashMap<String, String>, Vec<u8>);

    /// Records every call and answers with a canned response.
    #[derive(Clone, Default)]
    struct MockTransport {
        calls: Arc<Mutex<Vec<RecordedCall>>>,
        status: u16,
        reply: Vec<u8>,
    }

    impl MockTransport {
        fn replying(status: u16, reply: &[u8]) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                status,
                reply: reply.to_vec(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            url: &str,
            headers: &HashMap<String, String>,
            body: Vec<u8>,
        ) -> Result<TransportResponse> {
            self.calls.lock().push((url.to_string(), headers.clone(), body));
            Ok(TransportResponse {
                status: self.status,
                body: self.reply.clone(),
            })
        }
    }

    /// Fails every call with a connection-style error.
    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(
            &self,
            _url: &str,
            _headers: &HashMap<String, String>,
            _body: Vec<u8>,
        ) -> Result<TransportResponse> {
            Err(DocgateError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    fn submitter(transport: MockTransport) -> DocumentSubmitter<MockTransport> {
        DocumentSubmitter::with_transport(
            Duration::from_secs(1),
            2,
            "https://registry.test/api/v3",
            transport,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_default_base_url() {
        let submitter = DocumentSubmitter::new(Duration::from_secs(60), 10).unwrap();
        assert_eq!(submitter.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_submit_posts_expected_body_and_headers() {
        let transport = MockTransport::replying(200, b"ok");
        let submitter = submitter(transport.clone());

        let document = json!({"inn": "123"});
        let response = submitter.submit(&document, "abc").await.unwrap();

        assert_eq!(response.status, 200);

        let calls = transport.calls.lock();
        assert_eq!(calls.len(), 1);

        let (url, headers, body) = &calls[0];
        assert_eq!(url, "https://registry.test/api/v3");
        assert_eq!(
            headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            body,
            &br#"{"document":{"inn":"123"},"signature":"abc"}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn test_null_document_makes_no_network_call() {
        let transport = MockTransport::replying(200, b"ok");
        let submitter = submitter(transport.clone());

        let result = submitter.submit(&Value::Null, "abc").await;

        assert!(matches!(result, Err(DocgateError::InvalidArgument(_))));
        assert_eq!(transport.call_count(), 0);
        assert_eq!(submitter.limiter().admitted_in_window(), 0);
    }

    #[tokio::test]
    async fn test_empty_signature_makes_no_network_call() {
        let transport = MockTransport::replying(200, b"ok");
        let submitter = submitter(transport.clone());

        let result = submitter.submit(&json!({"inn": "123"}), "").await;

        assert!(matches!(result, Err(DocgateError::InvalidArgument(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_response_returned_unmodified() {
        let transport = MockTransport::replying(201, b"created");
        let submitter = submitter(transport);

        let response = submitter.submit(&json!({"inn": "123"}), "abc").await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.text(), "created");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submissions_over_limit_are_throttled() {
        let transport = MockTransport::replying(200, b"ok");
        let submitter = submitter(transport.clone());
        let document = json!({"inn": "123"});

        let start = Instant::now();
        submitter.submit(&document, "abc").await.unwrap();
        submitter.submit(&document, "abc").await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        submitter.submit(&document, "abc").await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_and_keeps_slot() {
        let submitter = DocumentSubmitter::with_transport(
            Duration::from_secs(1),
            2,
            "https://registry.test/api/v3",
            FailingTransport,
        )
        .unwrap();

        let result = submitter.submit(&json!({"inn": "123"}), "abc").await;

        assert!(result.is_err());
        // A granted slot is never returned, even when the call fails
        assert_eq!(submitter.limiter().admitted_in_window(), 1);
    }
}
