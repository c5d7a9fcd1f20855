//! Request pipeline: every resource call goes through [`SettlerClient::execute`].

use crate::client::dedup::fingerprint;
use crate::client::error_classification::classify;
use crate::client::policy::{Decision, RetryPolicy};
use crate::transport::{Method, TransportError, TransportRequest, TransportResponse};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core::SettlerClient;

pub const USER_AGENT_VALUE: &str = concat!("settler-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Per-call correlation id. The API may ignore it; it ties log lines together.
pub const REQUEST_ID_HEADER: &str = "x-settler-request-id";

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    body: serde_json::Value,
}

impl ApiResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// The `data` field of the response envelope, if any.
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.body.get("data")
    }

    /// Unwrap the `data` envelope; falls back to the whole body when absent.
    pub fn into_data(self) -> serde_json::Value {
        match self.body {
            serde_json::Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(serde_json::Value::Null)
            }
            other => other,
        }
    }

    /// `data` as a list; empty when missing or not an array.
    pub fn into_data_list(self) -> Vec<serde_json::Value> {
        match self.body {
            serde_json::Value::Object(mut map) => match map.remove("data") {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Deserialize the unwrapped `data` into a caller-chosen type.
    pub fn into_data_as<T: DeserializeOwned>(self) -> Result<T> {
        let status = self.status;
        serde_json::from_value(self.into_data())
            .map_err(|e| Error::api(format!("Failed to decode response data: {}", e), status))
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.body
    }
}

impl SettlerClient {
    /// Send one authenticated request.
    ///
    /// - `path` is joined onto the configured base URL.
    /// - With `deduplicate` set, a POST/PUT/PATCH identical (method, URL, body) to one
    ///   sent within the dedup window fails with [`Error::DuplicateRequest`] and
    ///   never reaches the network.
    /// - Transport failures and 429/5xx responses are retried per the configured
    ///   policy; the final outcome is classified into [`Error`].
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: Option<&[(&str, &str)]>,
        deduplicate: bool,
    ) -> Result<ApiResponse> {
        let config = &self.inner.config;
        let url = config.resolve_url(path);
        let request_id = Uuid::new_v4().to_string();
        let headers = self.build_headers(&request_id)?;

        if deduplicate && method.is_mutating() {
            let key = fingerprint(method.as_str(), &url, body);
            if !self.inner.dedup.check_and_insert(&key, Instant::now())? {
                debug!(
                    method = method.as_str(),
                    url = url.as_str(),
                    "settler request rejected as duplicate"
                );
                return Err(Error::DuplicateRequest {
                    method: method.to_string(),
                    url,
                });
            }
        }

        let request = TransportRequest {
            method,
            url,
            headers,
            body: body.cloned(),
            query: query
                .unwrap_or_default()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout: config.timeout,
        };

        let start = Instant::now();
        let (outcome, attempts) = self.send_with_retry(&request).await;

        match outcome {
            Ok(resp) if resp.status >= 400 => {
                let err = classify(resp.status, &resp.body);
                info!(
                    http_status = resp.status,
                    error_kind = err.kind().as_str(),
                    attempts,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str(),
                    path,
                    "settler request failed"
                );
                Err(err)
            }
            Ok(resp) => {
                debug!(
                    http_status = resp.status,
                    attempts,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str(),
                    "settler request succeeded"
                );
                decode(resp)
            }
            Err(e) => {
                let err = match e {
                    TransportError::Timeout => Error::network("Request timeout", 408),
                    TransportError::Connect(_) => Error::network("Connection error", 0),
                    TransportError::Other(msg) => {
                        Error::network(format!("Request failed: {}", msg), 0)
                    }
                };
                info!(
                    error = %err,
                    attempts,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str(),
                    path,
                    "settler request failed before a response was received"
                );
                Err(err)
            }
        }
    }

    /// Run the transport call under the retry policy.
    ///
    /// Returns the last outcome together with the number of attempts made.
    async fn send_with_retry(
        &self,
        request: &TransportRequest,
    ) -> (std::result::Result<TransportResponse, TransportError>, u32) {
        let config = &self.inner.config;
        let policy = RetryPolicy::new(config.max_retries, config.retry_backoff);
        let mut attempt = 0u32;

        loop {
            let outcome = self.inner.transport.send(request.clone()).await;
            let decision = match &outcome {
                Ok(resp) => policy.decide_response(request.method, resp, attempt),
                Err(e) => policy.decide_error(request.method, e, attempt),
            };

            match decision {
                Decision::Done => return (outcome, attempt + 1),
                Decision::Retry { delay } => {
                    let http_status = outcome.as_ref().map(|r| r.status).unwrap_or(0);
                    warn!(
                        attempt = attempt + 1,
                        http_status,
                        delay_ms = delay.as_millis() as u64,
                        method = request.method.as_str(),
                        url = request.url.as_str(),
                        "retrying settler request"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn build_headers(&self, request_id: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.inner.config.api_key))
            .map_err(|_| {
                Error::configuration_with_context(
                    "API key contains characters not allowed in an HTTP header",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("request_pipeline"),
                )
            })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Ok(v) = HeaderValue::from_str(request_id) {
            headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), v);
        }
        Ok(headers)
    }
}

fn decode(resp: TransportResponse) -> Result<ApiResponse> {
    let body = if resp.body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&resp.body).map_err(|e| {
            Error::api(format!("Failed to parse response: {}", e), resp.status)
        })?
    };
    Ok(ApiResponse {
        status: resp.status,
        body,
    })
}
