//! Transport boundary: the only I/O the client performs.
//!
//! [`HttpTransport`] is the production implementation. Tests and embedders can
//! supply their own [`Transport`] through
//! [`SettlerClientBuilder::transport`](crate::SettlerClientBuilder::transport).

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// HTTP methods the Settler API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Create / replace / partial-update methods; the ones subject to deduplication.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(crate::Error::configuration_with_context(
                format!("unsupported HTTP method: {}", other),
                crate::ErrorContext::new().with_field_path("method"),
            )),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One fully resolved outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Status, headers and raw body of a received response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Best-effort parsing of `Retry-After: <seconds>`.
    pub fn retry_after(&self) -> Option<Duration> {
        let raw = self.headers.get("retry-after")?.to_str().ok()?;
        let secs: u64 = raw.trim().parse().ok()?;
        Some(Duration::from_secs(secs))
    }
}

/// Failure before any response was received.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Timeouts and connection failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Timeout | TransportError::Connect(_))
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}
