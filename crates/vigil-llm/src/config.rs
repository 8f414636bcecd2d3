use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vigil_common::{Result, VigilError};

use crate::client::CompletionClient;
use crate::foundry::FoundryClient;
use crate::local::LocalClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Provider type: "local", "foundry"
    pub provider: String,

    /// Endpoint base URL (required for foundry, optional for local)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// API key (foundry only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: "local".into(),
            api_url: None,
            api_key: None,
            timeout_ms: None,
        }
    }
}

pub fn build_completion_client(config: &CompletionConfig) -> Result<Arc<dyn CompletionClient>> {
    match config.provider.as_str() {
        "local" => Ok(Arc::new(LocalClient::new(
            config.api_url.clone(),
            config.timeout_ms,
        ))),
        "foundry" => {
            let base_url = config.api_url.clone().ok_or_else(|| {
                VigilError::Config("foundry provider requires api_url".to_string())
            })?;
            let api_key = config.api_key.clone().ok_or_else(|| {
                VigilError::Config("foundry provider requires an API key".to_string())
            })?;
            Ok(Arc::new(FoundryClient::new(
                base_url,
                api_key,
                config.timeout_ms,
            )))
        }
        other => Err(VigilError::Config(format!(
            "Unknown completion provider: {other}"
        ))),
    }
}
