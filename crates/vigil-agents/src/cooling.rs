//! Cooling manager specialist - temperature and thermal optimization.

use crate::consult::consult;
use crate::source::ReadingSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vigil_common::{AgentKey, Result, Specialist, SpecialistConfig};
use vigil_llm::{CompletionClient, CompletionRequest};

const COOLING_SYSTEM_PROMPT: &str = "You are a Cooling Manager AI Agent for a data center. \
Given real-time temperature, humidity, and rack load info, decide whether to increase, \
decrease, or maintain cooling output. Your goal is to maintain optimal temperature while \
minimizing energy consumption.";

const HIGH_TEMPERATURE: f64 = 30.0;
const DATA_FILE: &str = "cooling_data.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct CoolingReading {
    pub temperature: f64,
    pub humidity: f64,
    pub rack_load: f64,
}

pub struct CoolingSpecialist {
    config: SpecialistConfig,
    source: ReadingSource<CoolingReading>,
    client: Arc<dyn CompletionClient>,
}

impl CoolingSpecialist {
    pub fn new(source: ReadingSource<CoolingReading>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: SpecialistConfig::named("Cooling Manager"),
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

    fn assess(reading: &CoolingReading) -> String {
        if reading.temperature >= HIGH_TEMPERATURE {
            format!(
                "Cooling deficit: {} C at {} % rack load. Increase cooling output.",
                reading.temperature, reading.rack_load
            )
        } else {
            format!(
                "Temperature within range ({} C). Maintain current cooling settings.",
                reading.temperature
            )
        }
    }

    fn build_prompt(issue: &str, reading: &CoolingReading) -> String {
        format!(
            "Reported Issue: {issue}\n\
             Temperature: {} C\n\
             Humidity: {} %\n\
             Rack Load: {} %\n\
             Should the cooling be increased, decreased, or maintained?",
            reading.temperature, reading.humidity, reading.rack_load
        )
    }
}

#[async_trait]
impl Specialist for CoolingSpecialist {
    fn key(&self) -> AgentKey {
        AgentKey::Cooling
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(COOLING_SYSTEM_PROMPT)
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        info!(agent = %self.key(), "Processing cooling analysis");

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
