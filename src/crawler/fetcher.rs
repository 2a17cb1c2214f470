//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for listing pages (text) and documents (bytes)
//! - Error classification into status and network failures
//!
//! Each address is requested exactly once; nothing here retries.

use crate::config::UserAgentConfig;
use reqwest::{Client, Response};
use std::fmt;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult<T> {
    /// Successfully fetched the resource
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: T,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, truncated body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl<T> FetchResult<T> {
    /// Converts the result into the body, or a printable failure reason
    ///
    /// Successful fetches are logged with the address they ended up at, which
    /// differs from the requested one when the server redirected.
    pub fn into_body(self) -> Result<T, FetchFailure> {
        match self {
            Self::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!(status_code, "Fetched {}", final_url);
                Ok(body)
            }
            Self::HttpError { status_code } => Err(FetchFailure::Status(status_code)),
            Self::NetworkError { error } => Err(FetchFailure::Network(error)),
        }
    }
}

/// Why a fetch did not produce a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Non-success HTTP status
    Status(u16),

    /// Transport-level failure
    Network(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Network(error) => write!(f, "{}", error),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// No timeout is applied unless `timeout` is set, so an unresponsive server
/// blocks the walk until it answers or the connection drops.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Optional per-request timeout
///
/// # Example
///
/// ```no_run
/// use council_docs::config::UserAgentConfig;
/// use council_docs::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetches a listing page as text
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult<String> {
    let response = match send(client, url).await {
        Ok(r) => r,
        Err(failure) => return failure,
    };

    let final_url = response.url().to_string();
    let status_code = response.status().as_u16();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Fetches a document as raw bytes
///
/// The whole body is received before returning, so a connection dropped
/// mid-transfer surfaces as a `NetworkError` rather than a short body.
pub async fn fetch_document(client: &Client, url: &str) -> FetchResult<Vec<u8>> {
    let response = match send(client, url).await {
        Ok(r) => r,
        Err(failure) => return failure,
    };

    let final_url = response.url().to_string();
    let status_code = response.status().as_u16();

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code,
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Sends a GET request and classifies non-success outcomes
async fn send<T>(client: &Client, url: &str) -> Result<Response, FetchResult<T>> {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return Err(FetchResult::HttpError {
                    status_code: status.as_u16(),
                });
            }
            Ok(response)
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            Err(FetchResult::NetworkError { error })
        }
    }
}
