//! HTTP client helpers for tests.

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Posts a sentence pair; returns the status code and the decoded JSON body.
    pub async fn calculate_similarity(
        &self,
        sentence1: &str,
        sentence2: &str,
    ) -> reqwest::Result<(u16, serde_json::Value)> {
        let body = serde_json::json!({
            "sentence1": sentence1,
            "sentence2": sentence2,
        });

        let resp = self
            .client
            .post(self.url("/calculate-similarity"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        Ok((status, resp.json().await?))
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<(u16, serde_json::Value)> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await?))
    }
}
