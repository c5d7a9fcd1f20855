use super::{segment, to_body, CreateJobRequest};
use crate::transport::Method;
use crate::{Result, SettlerClient};

/// Reconciliation job operations.
pub struct JobsClient<'a> {
    client: &'a SettlerClient,
}

impl<'a> JobsClient<'a> {
    pub(crate) fn new(client: &'a SettlerClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateJobRequest) -> Result<serde_json::Value> {
        let body = to_body(request)?;
        let resp = self
            .client
            .execute(Method::Post, "/api/v1/jobs", Some(&body), None, true)
            .await?;
        Ok(resp.into_data())
    }

    pub async fn get(&self, job_id: &str) -> Result<serde_json::Value> {
        let path = format!("/api/v1/jobs/{}", segment(job_id));
        let resp = self
            .client
            .execute(Method::Get, &path, None, None, true)
            .await?;
        Ok(resp.into_data())
    }

    /// One page of jobs. Returns the whole envelope so pagination metadata
    /// stays available next to `data`.
    pub async fn list(&self, page: u32, limit: u32) -> Result<serde_json::Value> {
        let page = page.to_string();
        let limit = limit.to_string();
        let query = [("page", page.as_str()), ("limit", limit.as_str())];
        let resp = self
            .client
            .execute(Method::Get, "/api/v1/jobs", None, Some(&query[..]), true)
            .await?;
        Ok(resp.into_inner())
    }

    /// Trigger an execution. Subject to deduplication like any other POST.
    pub async fn run(&self, job_id: &str) -> Result<serde_json::Value> {
        let path = format!("/api/v1/jobs/{}/run", segment(job_id));
        let resp = self
            .client
            .execute(Method::Post, &path, None, None, true)
            .await?;
        Ok(resp.into_data())
    }

    pub async fn delete(&self, job_id: &str) -> Result<()> {
        let path = format!("/api/v1/jobs/{}", segment(job_id));
        self.client
            .execute(Method::Delete, &path, None, None, true)
            .await?;
        Ok(())
    }
}
