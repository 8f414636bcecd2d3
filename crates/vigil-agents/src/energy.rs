//! Energy optimizer specialist - power usage and efficiency.

use crate::consult::consult;
use crate::source::ReadingSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vigil_common::{AgentKey, Result, Specialist, SpecialistConfig};
use vigil_llm::{CompletionClient, CompletionRequest};

const ENERGY_SYSTEM_PROMPT: &str = "You are an Energy Optimizer AI Agent for a data center. \
You analyze power draw and load data to reduce consumption without harming workloads. \
Based on metrics, recommend concrete energy-saving actions.";

const ENERGY_THRESHOLD: f64 = 70.0;
const DATA_FILE: &str = "energy_data.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct EnergyReading {
    pub timestamp: String,
    pub energy_usage: f64,
}

/// Energy specialist, backed by the energy usage fixture.
pub struct EnergySpecialist {
    config: SpecialistConfig,
    source: ReadingSource<EnergyReading>,
    client: Arc<dyn CompletionClient>,
}

impl EnergySpecialist {
    pub fn new(source: ReadingSource<EnergyReading>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: SpecialistConfig::named("Energy Optimizer"),
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

    fn assess(reading: &EnergyReading) -> String {
        if reading.energy_usage > ENERGY_THRESHOLD {
            format!(
                "High energy detected ({} units). Action: Reduce lighting, shift non-critical compute loads.",
                reading.energy_usage
            )
        } else {
            format!(
                "Energy usage normal ({} units). No immediate action needed.",
                reading.energy_usage
            )
        }
    }

    fn build_prompt(issue: &str, reading: &EnergyReading) -> String {
        format!(
            "Reported Issue: {issue}\n\
             Timestamp: {}\n\
             Current Energy Usage: {} units\n\
             What should be done to optimize energy consumption?",
            reading.timestamp, reading.energy_usage
        )
    }
}

#[async_trait]
impl Specialist for EnergySpecialist {
    fn key(&self) -> AgentKey {
        AgentKey::Energy
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(ENERGY_SYSTEM_PROMPT)
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        info!(agent = %self.key(), "Processing energy analysis");

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
