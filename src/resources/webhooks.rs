use super::{segment, to_body, CreateWebhookRequest};
use crate::transport::Method;
use crate::{Result, SettlerClient};

/// Webhook endpoint registration.
pub struct WebhooksClient<'a> {
    client: &'a SettlerClient,
}

impl<'a> WebhooksClient<'a> {
    pub(crate) fn new(client: &'a SettlerClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateWebhookRequest) -> Result<serde_json::Value> {
        let body = to_body(request)?;
        let resp = self
            .client
            .execute(Method::Post, "/api/v1/webhooks", Some(&body), None, true)
            .await?;
        Ok(resp.into_data())
    }

    pub async fn list(&self) -> Result<Vec<serde_json::Value>> {
        let resp = self
            .client
            .execute(Method::Get, "/api/v1/webhooks", None, None, true)
            .await?;
        Ok(resp.into_data_list())
    }

    pub async fn delete(&self, webhook_id: &str) -> Result<()> {
        let path = format!("/api/v1/webhooks/{}", segment(webhook_id));
        self.client
            .execute(Method::Delete, &path, None, None, true)
            .await?;
        Ok(())
    }
}
