//! Local mock completion provider.
//!
//! Talks to the `vigil-mock-llm` service, which simulates completions with
//! keyword-matched canned outputs. No authentication.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use vigil_common::{Result, VigilError};

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse, ThreadHandle};
use crate::stream::CompletionStream;
use crate::wire::{parse_reply, pump_ndjson, QueryBody, QueryParameters};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_TEMPERATURE: f32 = 0.7;

pub struct LocalClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl LocalClient {
    pub fn new(base_url: Option<String>, timeout_ms: Option<u64>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            http_client,
        }
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
        let url = format!("{}/query", self.base_url);
        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| VigilError::Completion(format!("local endpoint request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(VigilError::Completion(format!(
                "local endpoint error {status}: {body_text}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl CompletionClient for LocalClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = Self::build_body(&request, false);
        let response = self.post(&body).await?;

        let value: serde_json::Value = response.json().await.map_err(|e| {
            VigilError::Completion(format!("failed to parse local endpoint reply: {e}"))
        })?;

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
        debug!(thread = %thread, "Releasing local thread");

        let url = format!("{}/threads/{}", self.base_url, thread.id());
        let response = self
            .http_client
            .delete(url)
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
        "local"
    }
}
