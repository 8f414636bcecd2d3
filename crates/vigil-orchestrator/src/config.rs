//! Configuration for the orchestrator.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;
use vigil_llm::CompletionConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Completion endpoint configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Directory holding the specialists' CSV fixture files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./mock_data")
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        if config.completion.api_key.is_some() {
            warn!(
                "API key found in config file '{}'. For better security, \
                 use the FOUNDRY_API_KEY environment variable instead.",
                path.display()
            );
        }

        Ok(config)
    }

    /// Completion config with the API key resolved.
    ///
    /// Priority: explicit `api_key` in the file, then the
    /// `FOUNDRY_API_KEY` environment variable (foundry provider only).
    pub fn resolved_completion(&self) -> CompletionConfig {
        let mut completion = self.completion.clone();

        let has_key = completion
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty());

        if !has_key && completion.provider == "foundry" {
            completion.api_key = std::env::var("FOUNDRY_API_KEY").ok();
        }

        completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_uses_local_provider() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.completion.provider, "local");
        assert_eq!(config.data_dir, PathBuf::from("./mock_data"));
    }

    #[test]
    fn from_file_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
data_dir = "/var/lib/vigil/data"

[completion]
provider = "foundry"
api_url = "https://models.example.net"
api_key = "fk-test"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = OrchestratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.completion.provider, "foundry");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/vigil/data"));
        assert_eq!(config.completion.api_key.as_deref(), Some("fk-test"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: OrchestratorConfig = toml::from_str("").unwrap();
        assert_eq!(config.completion.provider, "local");
        assert_eq!(config.data_dir, PathBuf::from("./mock_data"));
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let config = OrchestratorConfig {
            completion: CompletionConfig {
                provider: "foundry".into(),
                api_url: Some("https://models.example.net".into()),
                api_key: Some("fk-explicit".into()),
                timeout_ms: None,
            },
            data_dir: default_data_dir(),
        };
        let resolved = config.resolved_completion();
        assert_eq!(resolved.api_key.as_deref(), Some("fk-explicit"));
    }
}
