//! Specialist result reporting.

use crate::AgentKey;
use serde::{Deserialize, Serialize};

/// The text payload returned by a specialist run, annotated with the
/// specialist's identity for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistReport {
    /// The key the issue was routed to
    pub key: AgentKey,

    /// Display name of the specialist that produced the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Analysis text (or failure description)
    pub content: String,

    /// Whether the specialist run completed without error
    pub ok: bool,

    /// Timestamp (Unix millis)
    pub timestamp: u64,
}

impl SpecialistReport {
    pub fn success(key: AgentKey, agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key,
            agent: Some(agent.into()),
            content: content.into(),
            ok: true,
            timestamp: now_millis(),
        }
    }

    pub fn failure(key: AgentKey, cause: impl Into<String>) -> Self {
        Self {
            key,
            agent: None,
            content: format!("Error executing {} agent: {}", key, cause.into()),
            ok: false,
            timestamp: now_millis(),
        }
    }

    /// Sentinel report for issues that matched no routing rule. No
    /// specialist is invoked for these.
    pub fn unrouted() -> Self {
        Self {
            key: AgentKey::Unknown,
            agent: None,
            content: "No appropriate agent found for this issue.".into(),
            ok: false,
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_report_carries_identity() {
        let report = SpecialistReport::success(AgentKey::Cooling, "Cooling Manager", "all good");
        assert!(report.ok);
        assert_eq!(report.key, AgentKey::Cooling);
        assert_eq!(report.agent.as_deref(), Some("Cooling Manager"));
        assert_eq!(report.content, "all good");
    }

    #[test]
    fn failure_report_names_key_and_cause() {
        let report = SpecialistReport::failure(AgentKey::Security, "connection refused");
        assert!(!report.ok);
        assert!(report.content.contains("security"));
        assert!(report.content.contains("connection refused"));
    }

    #[test]
    fn unrouted_sentinel() {
        let report = SpecialistReport::unrouted();
        assert_eq!(report.key, AgentKey::Unknown);
        assert!(!report.ok);
        assert!(report.content.contains("No appropriate agent"));
    }
}
