//! Resource allocator specialist - compute, storage, and bandwidth.

use crate::consult::consult;
use crate::source::ReadingSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vigil_common::{AgentKey, Result, Specialist, SpecialistConfig};
use vigil_llm::{CompletionClient, CompletionRequest};

const RESOURCE_SYSTEM_PROMPT: &str = "You are a Resource Allocator AI Agent for a data center. \
You analyze compute usage, storage pressure, and bandwidth demand, and decide whether to scale \
up, scale down, or maintain the current allocation.";

const DATA_FILE: &str = "resource_data.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReading {
    pub compute_load: f64,
    pub storage_utilization: f64,
    pub bandwidth: f64,
    pub cost: f64,
    pub status: String,
}

pub struct ResourceSpecialist {
    config: SpecialistConfig,
    source: ReadingSource<ResourceReading>,
    client: Arc<dyn CompletionClient>,
}

impl ResourceSpecialist {
    pub fn new(source: ReadingSource<ResourceReading>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: SpecialistConfig::named("Resource Allocator"),
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

    fn assess(reading: &ResourceReading) -> String {
        if reading.status.eq_ignore_ascii_case("overloaded") {
            format!(
                "Scale Up: compute at {} % with {} Mbps of bandwidth in use.",
                reading.compute_load, reading.bandwidth
            )
        } else if reading.status.eq_ignore_ascii_case("underutilized") {
            format!(
                "Scale Down: compute at {} %, allocation is underutilized.",
                reading.compute_load
            )
        } else {
            "Maintain Current Allocation.".into()
        }
    }

    fn build_prompt(issue: &str, reading: &ResourceReading) -> String {
        format!(
            "Reported Issue: {issue}\n\
             Compute Load (%): {}\n\
             Storage Utilization (%): {}\n\
             Bandwidth Usage (Mbps): {}\n\
             Cost per Unit ($): {}\n\
             Current Allocation Status: {}\n\
             Should the allocation be scaled up, scaled down, or maintained?",
            reading.compute_load,
            reading.storage_utilization,
            reading.bandwidth,
            reading.cost,
            reading.status
        )
    }
}

#[async_trait]
impl Specialist for ResourceSpecialist {
    fn key(&self) -> AgentKey {
        AgentKey::Resource
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(RESOURCE_SYSTEM_PROMPT)
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        info!(agent = %self.key(), "Processing resource analysis");

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

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(status: &str) -> ResourceReading {
        ResourceReading {
            compute_load: 85.0,
            storage_utilization: 60.0,
            bandwidth: 420.0,
            cost: 0.12,
            status: status.into(),
        }
    }

    #[test]
    fn overloaded_scales_up() {
        let verdict = ResourceSpecialist::assess(&reading("Overloaded"));
        assert!(verdict.contains("Scale Up"));
    }

    #[test]
    fn underutilized_scales_down() {
        let verdict = ResourceSpecialist::assess(&reading("Underutilized"));
        assert!(verdict.contains("Scale Down"));
    }

    #[test]
    fn balanced_allocation_holds() {
        let verdict = ResourceSpecialist::assess(&reading("Balanced"));
        assert!(verdict.contains("Maintain Current Allocation"));
    }

    #[test]
    fn status_matching_ignores_case() {
        let verdict = ResourceSpecialist::assess(&reading("overloaded"));
        assert!(verdict.contains("Scale Up"));
    }
}
