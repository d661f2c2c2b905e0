//! HTTP client abstraction for testability
//!
//! The fetcher and the tarball downloader both go through [`HttpClient`],
//! so tests can swap in a scripted mock and the rest of the pipeline never
//! touches the network.

use crate::error::{TarponError, TarponResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// A received HTTP response: status plus raw body.
///
/// Status classification is left to the caller — a non-2xx registry reply
/// still carries a body worth parsing for its error message.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8, lossily decoded for error messages
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Abstract HTTP GET interface
///
/// A transport-level failure (DNS, refused connection, timeout) is an
/// `Err`; any received response, success or not, is an `Ok`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> TarponResult<HttpResponse>;
}

/// Real HTTP client implementation using reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with the given request timeout in seconds.
    ///
    /// `0` disables the timeout entirely; a hung request then stalls its
    /// pipeline until the peer gives up.
    pub fn new(timeout_secs: u64) -> TarponResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tarpon/", env!("CARGO_PKG_VERSION")));
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| TarponError::Internal(format!("building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> TarponResult<HttpResponse> {
        debug!(url, "HTTP GET");
        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url, error = %e, "HTTP request failed");
                return Err(TarponError::network(url, e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TarponError::network(url, format!("reading response body: {}", e)))?
            .to_vec();

        debug!(url, status, bytes = body.len(), "HTTP response");
        Ok(HttpResponse { status, body })
    }
}
