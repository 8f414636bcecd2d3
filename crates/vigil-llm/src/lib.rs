pub mod client;
pub mod config;
pub mod foundry;
pub mod local;
pub mod stream;
mod wire;

pub use client::{
    CompletionClient, CompletionRequest, CompletionResponse, ThreadHandle,
};
pub use config::{build_completion_client, CompletionConfig};
pub use foundry::FoundryClient;
pub use local::LocalClient;
pub use stream::{CompletionStream, StreamChunk};
