//! Agent keys for routing decisions.

use serde::{Deserialize, Serialize};

/// Identifies which specialist should handle an issue.
///
/// The variant order matches the router's rule precedence: when an issue
/// mentions several domains, the earliest key in this order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKey {
    /// Power usage and efficiency
    Energy,
    /// Temperature and cooling systems
    Cooling,
    /// Access control and security logs
    Security,
    /// Equipment health and maintenance scheduling
    Maintenance,
    /// Regulatory and sustainability auditing
    Compliance,
    /// Compute/storage/bandwidth allocation
    Resource,
    /// No configured keyword matched
    Unknown,
}

impl AgentKey {
    /// All routable keys, in precedence order. `Unknown` is excluded
    /// because it is an outcome, not a dispatch target.
    pub const ROUTABLE: [AgentKey; 6] = [
        AgentKey::Energy,
        AgentKey::Cooling,
        AgentKey::Security,
        AgentKey::Maintenance,
        AgentKey::Compliance,
        AgentKey::Resource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKey::Energy => "energy",
            AgentKey::Cooling => "cooling",
            AgentKey::Security => "security",
            AgentKey::Maintenance => "maintenance",
            AgentKey::Compliance => "compliance",
            AgentKey::Resource => "resource",
            AgentKey::Unknown => "unknown",
        }
    }

    pub fn is_routable(&self) -> bool {
        !matches!(self, AgentKey::Unknown)
    }
}

impl std::fmt::Display for AgentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
