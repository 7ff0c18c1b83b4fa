// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's only network boundary.
//
// Given a URI, a fetcher returns the raw bytes of the page or a FetchError.
// It never looks at the status code: a 404 page is still a page to index.
// Only transport-level failures (DNS, connect, timeout) fail. A body that
// breaks off halfway is still returned, marked as truncated.
//
// Submodules:
// - http: the reqwest-backed fetcher used by the binary
//
// Rust concepts:
// - Traits: PageFetcher lets the crawler run against any byte source
// - async-trait: async methods on a trait object (Arc<dyn PageFetcher>)
// - thiserror: derive Display/Error for our error enum
// =============================================================================

mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpFetcher;

// Fetches a single page.
//
// Implementations must be Send + Sync because one fetcher is shared by every
// crawl task through an Arc.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<PageBody, FetchError>;
}

// The bytes of a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBody {
    pub bytes: Vec<u8>,
    /// Why the body stopped early, None when it was read to the end
    pub truncated: Option<String>,
}

#[cfg(test)]
impl PageBody {
    pub fn complete(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            truncated: None,
        }
    }
}

// Why a fetch failed.
//
// Every variant carries the URI so a log line is useful on its own.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete in time
    #[error("request to {uri} timed out")]
    Timeout { uri: String },

    /// DNS resolution or TCP/TLS connection failed
    #[error("could not connect to {uri}: {source}")]
    Connect {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    /// Anything else reqwest reports (invalid URL, redirect loop, ...)
    #[error("request to {uri} failed: {source}")]
    Request {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URI that could not be fetched
    pub fn uri(&self) -> &str {
        match self {
            FetchError::Timeout { uri }
            | FetchError::Connect { uri, .. }
            | FetchError::Request { uri, .. } => uri,
        }
    }
}
