//! Resource clients: each one only shapes paths and payloads, then calls
//! [`SettlerClient::execute`](crate::SettlerClient::execute).

pub mod adapters;
pub mod jobs;
pub mod reports;
pub mod types;
pub mod webhooks;

pub use adapters::AdaptersClient;
pub use jobs::JobsClient;
pub use reports::ReportsClient;
pub use types::{AdapterConfig, CreateJobRequest, CreateWebhookRequest, MatchingRule, MatchingRules};
pub use webhooks::WebhooksClient;

use crate::{Error, ErrorContext, Result};

/// Percent-encode a caller supplied id so it stays a single path segment.
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

pub(crate) fn to_body<T: serde::Serialize>(payload: &T) -> Result<serde_json::Value> {
    serde_json::to_value(payload).map_err(|e| {
        Error::runtime_with_context(
            format!("request body is not serializable: {}", e),
            ErrorContext::new().with_source("resource_client"),
        )
    })
}
