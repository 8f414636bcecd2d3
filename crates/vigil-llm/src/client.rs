use crate::stream::CompletionStream;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_common::Result;

/// Opaque handle for a conversation thread held by the completion service.
///
/// This is dialogue context, not an execution thread. Handles are issued by
/// the service on the first response and must be released when the dialogue
/// ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadHandle(pub String);

impl ThreadHandle {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System prompt for the call, if any
    pub system_prompt: Option<String>,

    /// The input text to complete
    pub input: String,

    /// Continue an existing conversation thread
    pub thread: Option<ThreadHandle>,

    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_thread(mut self, thread: Option<ThreadHandle>) -> Self {
        self.thread = thread;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The completed text
    pub content: String,

    /// Thread handle issued (or echoed) by the service
    pub thread: Option<ThreadHandle>,
}

/// A completion endpoint, remote or local.
///
/// Failures surface as `VigilError::Completion` and are expected to be
/// reported as text by the caller, never raised to the terminal user.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and wait for the full response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Send a prompt and receive the response as an ordered sequence of
    /// text chunks. The caller folds the chunks into a single string;
    /// dropping the stream abandons the remaining chunks.
    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream>;

    /// Release a conversation thread held by the service.
    async fn release_thread(&self, thread: &ThreadHandle) -> Result<()>;

    /// Short name of the endpoint, for logging.
    fn endpoint_name(&self) -> &str;
}

#[async_trait]
impl CompletionClient for Box<dyn CompletionClient> {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        (**self).complete(request).await
    }

    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream> {
        (**self).stream(request).await
    }

    async fn release_thread(&self, thread: &ThreadHandle) -> Result<()> {
        (**self).release_thread(thread).await
    }

    fn endpoint_name(&self) -> &str {
        (**self).endpoint_name()
    }
}
