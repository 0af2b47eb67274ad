//! HTTP transport used by the crawler and the robots.txt resolver
//!
//! The crawler never talks to reqwest directly: it goes through the
//! [`Transport`] trait so tests can substitute canned responses and failures.

mod client;

pub use client::{default_user_agent, HttpClient};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Failure of a single HTTP exchange
///
/// Every variant is a per-request problem. None of them stop a crawl.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP status {0}")]
    Status(StatusCode),

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Returns the HTTP status if the server answered with a non-success code
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Classifies a reqwest error raised while sending a request
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status)
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Minimal HTTP surface the crawler needs
///
/// Implementations must report any non-2xx answer as [`TransportError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a HEAD request and returns the response headers
    async fn head(&self, url: &Url) -> Result<HeaderMap, TransportError>;

    /// Sends a GET request and returns the full response body
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}
