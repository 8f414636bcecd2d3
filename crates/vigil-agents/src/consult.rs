//! Shared completion-call plumbing for the specialists.

use std::sync::Arc;
use tracing::warn;
use vigil_common::Result;
use vigil_llm::{CompletionClient, CompletionRequest};

/// Stream a completion and fold the chunks into one string.
///
/// Specialist calls are thread-scoped: if the service opened a conversation
/// thread for this request, it is released before returning. A release
/// failure is logged, not escalated.
pub(crate) async fn consult(
    client: &Arc<dyn CompletionClient>,
    request: CompletionRequest,
) -> Result<String> {
    let stream = client.stream(request).await?;
    let (content, thread) = stream.collect_text().await?;

    if let Some(thread) = thread {
        if let Err(e) = client.release_thread(&thread).await {
            warn!(thread = %thread, error = %e, "Failed to release specialist call thread");
        }
    }

    Ok(content)
}
