//! HTTP transport for the registration service.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{DocgateError, Result};

/// Response returned by the registration service.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Response body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for transport implementations.
///
/// This abstracts the HTTP layer so the submitter can be exercised against
/// an in-memory transport in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with the given headers.
    async fn send(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> Result<TransportResponse>;
}

/// Transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport with default client settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> Result<TransportResponse> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(DocgateError::Transport)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(DocgateError::Transport)?
            .to_vec();

        debug!(
            status,
            bytes = body.len(),
            "Received response from registration service"
        );

        Ok(TransportResponse { status, body })
    }
}
