//! Security sentinel specialist - access logs and alerting.

use crate::consult::consult;
use crate::source::ReadingSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vigil_common::{AgentKey, Result, Specialist, SpecialistConfig};
use vigil_llm::{CompletionClient, CompletionRequest};

const SECURITY_SYSTEM_PROMPT: &str = "You are an AI agent specialized in security monitoring \
and alerting for a data center. Analyze access metrics and recommend one of: 'Allow', \
'Investigate', 'Alert Admin', or 'Block Access'.";

const DATA_FILE: &str = "security_log_data.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityReading {
    pub access_time: String,
    pub user_role: String,
    pub location: String,
    pub method: String,
    pub failed_attempts: u32,
    pub alerts: String,
}

impl SecurityReading {
    fn alert_raised(&self) -> bool {
        !self.alerts.eq_ignore_ascii_case("none")
    }
}

pub struct SecuritySpecialist {
    config: SpecialistConfig,
    source: ReadingSource<SecurityReading>,
    client: Arc<dyn CompletionClient>,
}

impl SecuritySpecialist {
    pub fn new(source: ReadingSource<SecurityReading>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: SpecialistConfig::named("Security Sentinel"),
            source,
            client,
        }
    }

    pub fn from_data_dir(data_dir: &Path, client: Arc<dyn CompletionClient>) -> Result<Self> {
        let source = ReadingSource::from_csv(data_dir.join(DATA_FILE))?;
        Ok(Self::new(source, client))
    }

    pub fn with_config(mut self, config: SpecialistConfig) -> Self {
        self.config = config;
        self
    }

    fn assess(reading: &SecurityReading) -> String {
        if reading.failed_attempts > 0 {
            return format!(
                "Security Alert: {} failed login attempts from {} using {}.",
                reading.failed_attempts, reading.location, reading.method
            );
        }
        if reading.alert_raised() {
            return "Security Alert: Potential intrusion detected.".into();
        }
        "All clear: No security issues detected.".into()
    }

    fn build_prompt(issue: &str, reading: &SecurityReading) -> String {
        format!(
            "Reported Issue: {issue}\n\
             Access Time: {}\n\
             User Role: {}\n\
             Access Location: {}\n\
             Entry Method: {}\n\
             Failed Attempts: {}\n\
             Any security alerts?: {}\n\
             Based on the above, what action should be taken?",
            reading.access_time,
            reading.user_role,
            reading.location,
            reading.method,
            reading.failed_attempts,
            reading.alerts
        )
    }
}

#[async_trait]
impl Specialist for SecuritySpecialist {
    fn key(&self) -> AgentKey {
        AgentKey::Security
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(SECURITY_SYSTEM_PROMPT)
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        info!(agent = %self.key(), "Processing security analysis");

        let reading = self.source.next_reading()?;
        let verdict = Self::assess(&reading);

        let request = CompletionRequest {
            system_prompt: Some(self.system_prompt().to_string()),
            input: Self::build_prompt(issue, &reading),
            thread: None,
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };
        let suggestion = consult(&self.client, request).await?;

        Ok(format!("{verdict}\nLLM Suggestion: {suggestion}"))
    }
}
