use crate::client::dedup::DedupCache;
use crate::config::ClientConfig;
use crate::resources::{AdaptersClient, JobsClient, ReportsClient, WebhooksClient};
use crate::transport::Transport;
use crate::Result;
use std::sync::Arc;

/// Settler API client.
///
/// Cloning is cheap: clones share configuration, transport and the
/// deduplication cache.
#[derive(Clone)]
pub struct SettlerClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) dedup: DedupCache,
}

impl SettlerClient {
    /// Create a client with default settings for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        crate::client::builder::SettlerClientBuilder::new()
            .api_key(api_key)
            .build()
    }

    pub fn builder() -> crate::client::builder::SettlerClientBuilder {
        crate::client::builder::SettlerClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Fingerprints currently remembered by the dedup guard.
    pub fn dedup_cache(&self) -> &DedupCache {
        &self.inner.dedup
    }

    pub fn jobs(&self) -> JobsClient<'_> {
        JobsClient::new(self)
    }

    pub fn reports(&self) -> ReportsClient<'_> {
        ReportsClient::new(self)
    }

    pub fn webhooks(&self) -> WebhooksClient<'_> {
        WebhooksClient::new(self)
    }

    pub fn adapters(&self) -> AdaptersClient<'_> {
        AdaptersClient::new(self)
    }
}

impl std::fmt::Debug for SettlerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlerClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
