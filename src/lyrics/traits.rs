//! Trait definitions for the HTTP transport.
//!
//! The client never talks to reqwest directly; it goes through [`Transport`].
//! Production code uses [`HttpTransport`], while tests substitute
//! [`mocks::MockTransport`] with canned provider responses.
//!
//! # Example
//!
//! ```ignore
//! use lyrics_minder::lyrics::{MusixmatchClient, traits::Transport};
//!
//! fn build<T: Transport>(transport: T, token: &str) -> MusixmatchClient<T> {
//!     MusixmatchClient::with_transport(transport, token)
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::domain::LyricsError;

/// JSON-over-HTTP GET capability.
///
/// Retries, timeouts and cancellation belong to the implementation; the client
/// surfaces whatever this returns immediately.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` with the given headers and decode the body as JSON.
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, LyricsError>;
}

/// User agent sent by [`HttpTransport`]
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a transport with the default timeout
    pub fn new() -> Result<Self, LyricsError> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a transport that gives up on a request after `timeout`
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent identifying this crate
    pub fn with_timeout(timeout: Duration) -> Result<Self, LyricsError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LyricsError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, LyricsError> {
        let mut request = self.http_client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LyricsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LyricsError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))
    }
}
