// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP with reqwest.
//
// Key functionality:
// - One shared Client for the whole crawl (connection pooling)
// - Plain GET, no retries, reqwest's default redirect policy
// - Optional request timeout (none unless configured)
// - The body is streamed chunk by chunk; a failing chunk ends the body early
//   and the page is handed on as truncated
//
// Rust concepts:
// - async/await: the only place a crawl task ever waits
// - Streams: response.bytes_stream() yields the body in pieces
// - Error mapping: reqwest::Error is sorted into our FetchError variants
// =============================================================================

use async_trait::async_trait;
use futures::StreamExt; // StreamExt gives us .next() on the body stream
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FetchError, PageBody, PageFetcher};

// A PageFetcher backed by a reqwest Client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the fetcher
    //
    // Parameters:
    //   timeout: per-request timeout, None = wait as long as the transport does
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> Result<PageBody, FetchError> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| categorize_error(uri, e))?;

        // The status code is logged but not inspected
        debug!(uri, status = response.status().as_u16(), "fetched page");

        let mut body = PageBody::default();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(chunk) => body.bytes.extend_from_slice(&chunk),
                Err(e) => {
                    warn!(uri, error = %e, "page body ended early");
                    body.truncated = Some(e.to_string());
                    break;
                }
            }
        }

        Ok(body)
    }
}

// Sorts a reqwest error from send() into a FetchError
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure / connection refused
// - Invalid URL, too many redirects, etc.
fn categorize_error(uri: &str, error: reqwest::Error) -> FetchError {
    let uri = uri.to_string();

    if error.is_timeout() {
        FetchError::Timeout { uri }
    } else if error.is_connect() {
        FetchError::Connect { uri, source: error }
    } else {
        FetchError::Request { uri, source: error }
    }
}
