//! Predictive maintainer specialist - equipment health.

use crate::consult::consult;
use crate::source::ReadingSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vigil_common::{AgentKey, Result, Specialist, SpecialistConfig};
use vigil_llm::{CompletionClient, CompletionRequest};

const MAINTENANCE_SYSTEM_PROMPT: &str = "You are a Predictive Maintainer AI Agent for a data \
center. You analyze sensor data and hardware records to anticipate failures. Based on metrics, \
recommend: 'Schedule Maintenance', 'Monitor Closely', or 'No Action'.";

const HIGH_UPTIME_HOURS: f64 = 16_000.0;
const SPIKE_LIMIT: u32 = 3;
const DATA_FILE: &str = "maintenance_data.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceReading {
    pub component: String,
    pub uptime_hours: f64,
    pub spikes: u32,
    pub last_maintenance: u32,
    pub failure_history: String,
}

impl MaintenanceReading {
    fn has_failed_before(&self) -> bool {
        self.failure_history.eq_ignore_ascii_case("yes")
    }
}

pub struct MaintenanceSpecialist {
    config: SpecialistConfig,
    source: ReadingSource<MaintenanceReading>,
    client: Arc<dyn CompletionClient>,
}

impl MaintenanceSpecialist {
    pub fn new(
        source: ReadingSource<MaintenanceReading>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config: SpecialistConfig::named("Predictive Maintainer"),
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

    fn assess(reading: &MaintenanceReading) -> String {
        if reading.uptime_hours > HIGH_UPTIME_HOURS || reading.has_failed_before() {
            format!(
                "Maintenance due: {} at {} h uptime. Schedule maintenance soon.",
                reading.component, reading.uptime_hours
            )
        } else if reading.spikes > SPIKE_LIMIT {
            format!(
                "Inspect {}: {} temperature spikes since last service.",
                reading.component, reading.spikes
            )
        } else {
            format!("{} healthy. No action required.", reading.component)
        }
    }

    fn build_prompt(issue: &str, reading: &MaintenanceReading) -> String {
        format!(
            "Reported Issue: {issue}\n\
             Component: {}\n\
             Uptime (hours): {}\n\
             Temperature Spike Count: {}\n\
             Last Maintenance (days ago): {}\n\
             Failure History: {}\n\
             When should maintenance be scheduled?",
            reading.component,
            reading.uptime_hours,
            reading.spikes,
            reading.last_maintenance,
            reading.failure_history
        )
    }
}

#[async_trait]
impl Specialist for MaintenanceSpecialist {
    fn key(&self) -> AgentKey {
        AgentKey::Maintenance
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(MAINTENANCE_SYSTEM_PROMPT)
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        info!(agent = %self.key(), "Processing maintenance analysis");

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
