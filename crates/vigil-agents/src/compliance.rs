//! Compliance auditor specialist - regulatory and sustainability metrics.

use crate::consult::consult;
use crate::source::ReadingSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vigil_common::{AgentKey, Result, Specialist, SpecialistConfig};
use vigil_llm::{CompletionClient, CompletionRequest};

const COMPLIANCE_SYSTEM_PROMPT: &str = "You are a Compliance & Green Auditor AI Agent for a \
data center. You evaluate compliance with energy regulations and sustainability goals. Based \
on metrics, output: 'Compliant', 'Flag for Review', or 'Violation Detected'.";

const EMISSION_LIMIT: f64 = 80.0;
const DATA_FILE: &str = "compliance_data.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceReading {
    pub energy_kwh: f64,
    pub carbon_emission: f64,
    pub renewable_percent: f64,
    pub policy_target: f64,
    pub anomaly: String,
}

pub struct ComplianceSpecialist {
    config: SpecialistConfig,
    source: ReadingSource<ComplianceReading>,
    client: Arc<dyn CompletionClient>,
}

impl ComplianceSpecialist {
    pub fn new(
        source: ReadingSource<ComplianceReading>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config: SpecialistConfig::named("Compliance Auditor"),
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

    fn assess(reading: &ComplianceReading) -> String {
        if reading.carbon_emission >= EMISSION_LIMIT {
            format!(
                "Violation Detected: {} t CO2 emitted against the allowed ceiling.",
                reading.carbon_emission
            )
        } else if reading.renewable_percent < reading.policy_target {
            format!(
                "Flag for Review: renewable share {}% below policy target {}%.",
                reading.renewable_percent, reading.policy_target
            )
        } else {
            "Compliant: metrics within policy.".into()
        }
    }

    fn build_prompt(issue: &str, reading: &ComplianceReading) -> String {
        format!(
            "Reported Issue: {issue}\n\
             Energy Consumption (kWh): {}\n\
             Carbon Emission (tons CO2): {}\n\
             Renewable Energy Usage (%): {}\n\
             Policy Target: {}\n\
             Reported Anomaly?: {}\n\
             What is your compliance status recommendation?",
            reading.energy_kwh,
            reading.carbon_emission,
            reading.renewable_percent,
            reading.policy_target,
            reading.anomaly
        )
    }
}

#[async_trait]
impl Specialist for ComplianceSpecialist {
    fn key(&self) -> AgentKey {
        AgentKey::Compliance
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(COMPLIANCE_SYSTEM_PROMPT)
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        info!(agent = %self.key(), "Processing compliance analysis");

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
