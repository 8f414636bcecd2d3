//! Conversation session lifecycle.
//!
//! A session holds at most one conversation thread with the completion
//! service. The thread is adopted lazily from the first response and
//! released exactly once when the session closes, on every exit path.

use std::sync::Arc;
use tracing::{debug, warn};
use vigil_common::Result;
use vigil_llm::{CompletionClient, CompletionRequest, ThreadHandle};

pub struct Session {
    client: Arc<dyn CompletionClient>,
    thread: Option<ThreadHandle>,
    released: bool,
}

impl Session {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            thread: None,
            released: false,
        }
    }

    pub fn thread(&self) -> Option<&ThreadHandle> {
        self.thread.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.released
    }

    fn adopt_thread(&mut self, handle: ThreadHandle) {
        if self.thread.is_none() && !self.released {
            debug!(thread = %handle, "Adopted conversation thread");
            self.thread = Some(handle);
        }
    }

    /// Stream one conversational turn, invoking `on_chunk` for every text
    /// fragment as it arrives and folding the fragments into the returned
    /// string. The thread handle issued with the first response of the
    /// session is adopted for all following turns.
    pub async fn converse<F>(
        &mut self,
        system_prompt: &str,
        issue: &str,
        mut on_chunk: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let request = CompletionRequest::new(issue)
            .with_system_prompt(system_prompt)
            .with_thread(self.thread.clone());

        let mut stream = self.client.stream(request).await?;
        let mut content = String::new();

        while let Some(chunk) = stream.next_chunk().await {
            let chunk = chunk?;
            if self.thread.is_none() {
                if let Some(id) = chunk.thread_id.clone() {
                    self.adopt_thread(ThreadHandle(id));
                }
            }
            on_chunk(&chunk.chunk);
            content.push_str(&chunk.chunk);
        }

        Ok(content)
    }

    /// Close the session, releasing the conversation thread if one was
    /// adopted. Idempotent: release is attempted at most once, and a
    /// teardown failure is logged rather than escalated since no further
    /// action is meaningful during shutdown.
    pub async fn close(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Some(thread) = self.thread.take() {
            match self.client.release_thread(&thread).await {
                Ok(()) => debug!(thread = %thread, "Released conversation thread"),
                Err(e) => warn!(thread = %thread, error = %e, "Thread teardown failed"),
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.released && self.thread.is_some() {
            warn!("Session dropped without close(); conversation thread leaked");
        }
    }
}
