//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use mockito::{Mock, Server, ServerGuard};
use settler::SettlerClient;

pub const API_KEY: &str = "sk_test_123";

/// Test fixture that owns a mock server and builds clients pointed at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client with zero backoff so retry tests do not sleep.
    pub fn client_with_retries(&self, max_retries: u32) -> SettlerClient {
        SettlerClient::builder()
            .api_key(API_KEY)
            .base_url(&self.base_url)
            .max_retries(max_retries)
            .retry_backoff(0.0)
            .build()
            .expect("valid test configuration")
    }

    pub fn client(&self) -> SettlerClient {
        self.client_with_retries(2)
    }

    /// Create a mock answering `method path` with a JSON body, expected `hits` times.
    pub async fn mock_json(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: &str,
        hits: usize,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}
