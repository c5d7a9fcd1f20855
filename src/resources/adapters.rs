use super::segment;
use crate::transport::Method;
use crate::{Result, SettlerClient};

/// Read-only catalogue of available data-source adapters.
pub struct AdaptersClient<'a> {
    client: &'a SettlerClient,
}

impl<'a> AdaptersClient<'a> {
    pub(crate) fn new(client: &'a SettlerClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<serde_json::Value>> {
        let resp = self
            .client
            .execute(Method::Get, "/api/v1/adapters", None, None, true)
            .await?;
        Ok(resp.into_data_list())
    }

    pub async fn get(&self, adapter_name: &str) -> Result<serde_json::Value> {
        let path = format!("/api/v1/adapters/{}", segment(adapter_name));
        let resp = self
            .client
            .execute(Method::Get, &path, None, None, true)
            .await?;
        Ok(resp.into_data())
    }
}
