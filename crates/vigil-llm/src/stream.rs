//! Streamed completion delivery.
//!
//! A [`CompletionStream`] is a lazy, finite, non-restartable sequence of
//! text fragments. Chunks arrive in the order the service produced them,
//! with a suspension point at each chunk boundary; none are skipped or
//! reordered. Dropping the stream abandons any remaining chunks without
//! finalizing the conversation thread.

use crate::client::ThreadHandle;
use serde::Deserialize;
use tokio::sync::mpsc;
use vigil_common::Result;

/// One fragment of a streamed completion.
///
/// The wire form is a newline-delimited JSON line:
/// `{"chunk": "...", "thread_id": "...", "done": false}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub chunk: String,

    /// Thread id, present at least on the first line of a response
    #[serde(default)]
    pub thread_id: Option<String>,

    #[serde(default)]
    pub done: bool,
}

/// Receiver half of a streamed completion.
pub struct CompletionStream {
    rx: mpsc::Receiver<Result<StreamChunk>>,
    finished: bool,
}

impl CompletionStream {
    pub fn new(rx: mpsc::Receiver<Result<StreamChunk>>) -> Self {
        Self {
            rx,
            finished: false,
        }
    }

    /// Create a stream and the sender its producer task feeds.
    pub fn channel(buffer: usize) -> (mpsc::Sender<Result<StreamChunk>>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }

    /// Await the next chunk. `None` means the sequence is exhausted; the
    /// sequence is non-restartable, so `None` is terminal.
    pub async fn next_chunk(&mut self) -> Option<Result<StreamChunk>> {
        if self.finished {
            return None;
        }
        match self.rx.recv().await {
            Some(Ok(chunk)) if chunk.done => {
                self.finished = true;
                None
            }
            None => {
                self.finished = true;
                None
            }
            other => other,
        }
    }

    /// Fold the remaining chunks into a single string, returning the text
    /// together with the thread handle the service issued (if any).
    pub async fn collect_text(mut self) -> Result<(String, Option<ThreadHandle>)> {
        let mut content = String::new();
        let mut thread = None;
        while let Some(chunk) = self.next_chunk().await {
            let chunk = chunk?;
            if thread.is_none() {
                thread = chunk.thread_id.clone().map(ThreadHandle);
            }
            content.push_str(&chunk.chunk);
        }
        Ok((content, thread))
    }
}
