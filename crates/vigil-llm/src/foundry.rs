//! Remote completion provider (Azure AI Foundry style endpoint).

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use vigil_common::{Result, VigilError};

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse, ThreadHandle};
use crate::stream::CompletionStream;
use crate::wire::{parse_reply, pump_ndjson, QueryBody, QueryParameters};

const DEFAULT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Client for a remote completion endpoint authenticated with an `api-key`
/// header.
pub struct FoundryClient {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl FoundryClient {
    pub fn new(base_url: String, api_key: String, timeout_ms: Option<u64>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        }
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }

    fn build_body(request: &CompletionRequest, stream: bool) -> QueryBody {
        QueryBody {
            input: request.input.clone(),
            parameters: QueryParameters {
                temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                max_tokens: request.max_tokens,
            },
            system: request.system_prompt.clone(),
            thread_id: request.thread.as_ref().map(|t| t.id().to_string()),
            stream,
        }
    }

    async fn post(&self, body: &QueryBody) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(self.query_url())
            .header("api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| VigilError::Completion(format!("foundry request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(VigilError::Completion(format!(
                "foundry API error {status}: {body_text}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl CompletionClient for FoundryClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = Self::build_body(&request, false);
        let response = self.post(&body).await?;

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VigilError::Completion(format!("failed to parse foundry reply: {e}")))?;

        let (content, thread_id) = parse_reply(value)?;
        Ok(CompletionResponse {
            content,
            thread: thread_id.map(ThreadHandle),
        })
    }

    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream> {
        let body = Self::build_body(&request, true);
        let response = self.post(&body).await?;

        let (tx, stream) = CompletionStream::channel(32);
        tokio::spawn(pump_ndjson(response, tx));
        Ok(stream)
    }

    async fn release_thread(&self, thread: &ThreadHandle) -> Result<()> {
        debug!(thread = %thread, "Releasing foundry thread");

        let url = format!("{}/threads/{}", self.base_url, thread.id());
        let response = self
            .http_client
            .delete(url)
            .header("api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| VigilError::Teardown(format!("thread release failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VigilError::Teardown(format!(
                "thread release returned {status}"
            )));
        }
        Ok(())
    }

    fn endpoint_name(&self) -> &str {
        "foundry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_thread_and_defaults() {
        let request = CompletionRequest::new("Rack Load: 88 %")
            .with_thread(Some(ThreadHandle("t-7".into())));
        let body = FoundryClient::build_body(&request, false);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["input"], "Rack Load: 88 %");
        assert_eq!(json["thread_id"], "t-7");
        let temp = json["parameters"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 0.001);
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = FoundryClient::new(
            "https://models.example.net/".into(),
            "key".into(),
            None,
        );
        assert_eq!(client.query_url(), "https://models.example.net/query");
    }
}
