use super::segment;
use crate::transport::Method;
use crate::{Result, SettlerClient};

/// Reconciliation report operations.
pub struct ReportsClient<'a> {
    client: &'a SettlerClient,
}

impl<'a> ReportsClient<'a> {
    pub(crate) fn new(client: &'a SettlerClient) -> Self {
        Self { client }
    }

    /// Report for a job; the latest execution unless `execution_id` is given.
    pub async fn get(&self, job_id: &str, execution_id: Option<&str>) -> Result<serde_json::Value> {
        let mut path = format!("/api/v1/reports/{}", segment(job_id));
        if let Some(exec) = execution_id {
            path.push('/');
            path.push_str(&segment(exec));
        }
        let resp = self
            .client
            .execute(Method::Get, &path, None, None, true)
            .await?;
        Ok(resp.into_data())
    }

    /// Records left unmatched by a job execution.
    pub async fn get_unmatched(
        &self,
        job_id: &str,
        execution_id: Option<&str>,
    ) -> Result<Vec<serde_json::Value>> {
        let path = format!("/api/v1/reports/{}/unmatched", segment(job_id));
        let query: Vec<(&str, &str)> = execution_id
            .map(|e| vec![("execution_id", e)])
            .unwrap_or_default();
        let resp = self
            .client
            .execute(Method::Get, &path, None, Some(&query[..]), true)
            .await?;
        Ok(resp.into_data_list())
    }
}
