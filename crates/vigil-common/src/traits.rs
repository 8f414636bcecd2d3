//! The specialist trait and its configuration.
//!
//! Defined in `vigil-common` so the orchestrator and the agent crate can
//! both reference them without circular dependencies.

use crate::{AgentKey, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A specialist bound to one monitoring domain.
///
/// Each specialist owns its own data source and is invoked independently;
/// there is no shared mutable state between specialists.
#[async_trait]
pub trait Specialist: Send + Sync {
    /// The routing key this specialist answers to.
    fn key(&self) -> AgentKey;

    /// Human-readable name, used to annotate reports.
    fn name(&self) -> &str;

    /// The fixed system prompt sent with every completion call.
    fn system_prompt(&self) -> &str;

    /// Run the analysis pipeline for one issue: pull the next sensor
    /// reading, apply the domain rules, and ask the completion service for
    /// a recommendation.
    async fn investigate(&self, issue: &str) -> Result<String>;
}

/// Configuration for specialist creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistConfig {
    /// Human-readable name
    pub name: String,

    /// Custom system prompt (uses the domain default if not set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Temperature for completion requests
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens for completion responses
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

impl SpecialistConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}
