use crate::client::core::{ClientInner, SettlerClient};
use crate::client::dedup::{DedupCache, DEFAULT_DEDUP_TTL};
use crate::config::{ClientConfig, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct SettlerClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    max_retries: u32,
    retry_backoff: f64,
    dedup_ttl: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl SettlerClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            dedup_ttl: DEFAULT_DEDUP_TTL,
            transport: None,
        }
    }

    /// Start from environment variables:
    /// - `SETTLER_API_KEY`
    /// - `SETTLER_BASE_URL`
    /// - `SETTLER_TIMEOUT_SECS` (default 30)
    /// - `SETTLER_MAX_RETRIES` (default 3)
    /// - `SETTLER_RETRY_BACKOFF` (default 1.0)
    ///
    /// Unparseable numbers fall back to the defaults; explicit setters called
    /// afterwards still win.
    pub fn from_env() -> Self {
        let mut b = Self::new();
        b.api_key = std::env::var("SETTLER_API_KEY").ok();
        b.base_url = std::env::var("SETTLER_BASE_URL").ok();
        if let Some(secs) = std::env::var("SETTLER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            b.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = std::env::var("SETTLER_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            b.max_retries = n;
        }
        if let Some(f) = std::env::var("SETTLER_RETRY_BACKOFF")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
        {
            b.retry_backoff = f;
        }
        b
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API endpoint (default `https://api.settler.io`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Backoff multiplier in seconds: retry `n` waits `multiplier * 2^n`.
    pub fn retry_backoff(mut self, multiplier: f64) -> Self {
        self.retry_backoff = multiplier;
        self
    }

    /// Window during which an identical mutating request is rejected.
    pub fn dedup_ttl(mut self, ttl: Duration) -> Self {
        self.dedup_ttl = ttl;
        self
    }

    /// Inject a transport. Default is [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// Configuration is validated before any HTTP client is created.
    pub fn build(self) -> Result<SettlerClient> {
        let config = ClientConfig::validate(
            self.api_key,
            self.base_url,
            self.timeout,
            self.max_retries,
            self.retry_backoff,
            self.dedup_ttl,
        )?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new()?),
        };

        Ok(SettlerClient {
            inner: Arc::new(ClientInner {
                dedup: DedupCache::new(config.dedup_ttl),
                config,
                transport,
            }),
        })
    }
}

impl Default for SettlerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
