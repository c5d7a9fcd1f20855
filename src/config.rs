//! Immutable client configuration.

use crate::client::dedup::DEFAULT_DEDUP_TTL;
use crate::{Error, ErrorContext, Result};
use reqwest::header::HeaderValue;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.settler.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF: f64 = 1.0;

/// Validated settings shared by every call on a client.
///
/// Only [`SettlerClientBuilder`](crate::SettlerClientBuilder) constructs this,
/// and nothing mutates it afterwards.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) retry_backoff: f64,
    pub(crate) dedup_ttl: Duration,
}

impl ClientConfig {
    pub(crate) fn validate(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
        max_retries: u32,
        retry_backoff: f64,
        dedup_ttl: Duration,
    ) -> Result<Self> {
        let api_key = api_key.unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(invalid("API key is required", "api_key", None));
        }
        if HeaderValue::from_str(&format!("Bearer {}", api_key)).is_err() {
            return Err(invalid(
                "API key contains characters not allowed in an HTTP header",
                "api_key",
                None,
            ));
        }

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| invalid("invalid base URL", "base_url", Some(e.to_string())))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(
                "base URL must use http or https",
                "base_url",
                Some(format!("scheme: {}", parsed.scheme())),
            ));
        }

        if timeout.is_zero() {
            return Err(invalid("timeout must be positive", "timeout", None));
        }
        if max_retries == 0 {
            return Err(invalid("max retries must be positive", "max_retries", None));
        }
        if !retry_backoff.is_finite() || retry_backoff < 0.0 {
            return Err(invalid(
                "retry backoff must be a non-negative number",
                "retry_backoff",
                Some(retry_backoff.to_string()),
            ));
        }
        if dedup_ttl.is_zero() {
            return Err(invalid("dedup window must be positive", "dedup_ttl", None));
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_retries,
            retry_backoff,
            dedup_ttl,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_backoff(&self) -> f64 {
        self.retry_backoff
    }

    pub fn dedup_ttl(&self) -> Duration {
        self.dedup_ttl
    }

    /// Join `path` onto the base URL with exactly one `/` between them.
    pub fn resolve_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

// The credential never shows up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("dedup_ttl", &self.dedup_ttl)
            .finish()
    }
}

fn invalid(msg: &str, field: &str, details: Option<String>) -> Error {
    let mut ctx = ErrorContext::new()
        .with_field_path(field)
        .with_source("client_builder");
    if let Some(d) = details {
        ctx = ctx.with_details(d);
    }
    Error::configuration_with_context(msg, ctx)
}
