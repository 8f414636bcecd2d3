//! Core orchestrator implementation.

use crate::config::OrchestratorConfig;
use crate::routing::Router;
use crate::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use vigil_common::{AgentKey, Result, Specialist, SpecialistReport};
use vigil_llm::{build_completion_client, CompletionClient};

const ORCHESTRATOR_SYSTEM_PROMPT: &str = "You are an AI orchestrator specialized in datacenter \
monitoring and management. Analyze each incoming issue, explain which monitoring domain it \
belongs to, and summarize what should happen next. Issues are handled by: Energy Optimizer, \
Cooling Manager, Security Sentinel, Predictive Maintainer, Compliance Auditor, and Resource \
Allocator.";

/// Everything one conversational turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Streamed orchestrator commentary (or a failure description)
    pub commentary: String,

    /// Where the issue was routed
    pub key: AgentKey,

    /// The specialist's report, or the sentinel for unrouted issues
    pub report: SpecialistReport,
}

/// The orchestrator owns the routing table, the specialist registry, and
/// the completion client, and coordinates one turn at a time.
pub struct Orchestrator {
    router: Router,
    specialists: HashMap<AgentKey, Arc<dyn Specialist>>,
    client: Arc<dyn CompletionClient>,
}

impl Orchestrator {
    /// Build an orchestrator from configuration: completion client from
    /// the provider section, all six specialists from the data directory.
    pub fn new(config: &OrchestratorConfig) -> Result<Self> {
        info!(
            provider = %config.completion.provider,
            data_dir = %config.data_dir.display(),
            "Initializing orchestrator"
        );

        let client = build_completion_client(&config.resolved_completion())?;
        let specialists = vigil_agents::load_specialists(&config.data_dir, client.clone())?;
        Ok(Self::with_specialists(client, specialists))
    }

    /// Assemble an orchestrator from pre-built parts.
    pub fn with_specialists(
        client: Arc<dyn CompletionClient>,
        specialists: Vec<Arc<dyn Specialist>>,
    ) -> Self {
        let specialists = specialists
            .into_iter()
            .map(|s| (s.key(), s))
            .collect::<HashMap<_, _>>();

        Self {
            router: Router::new(),
            specialists,
            client,
        }
    }

    /// Open a new conversation session against this orchestrator's
    /// completion endpoint.
    pub fn open_session(&self) -> Session {
        Session::new(self.client.clone())
    }

    /// Map an issue description to an agent key.
    pub fn route(&self, issue: &str) -> AgentKey {
        self.router.route(issue)
    }

    /// Invoke the keyed specialist and wrap the outcome in a report.
    ///
    /// Specialist failures are caught here and converted into failure text;
    /// the caller always receives a report, never a raised fault. `Unknown`
    /// yields the sentinel report without invoking anything.
    pub async fn dispatch(&self, key: AgentKey, issue: &str) -> SpecialistReport {
        if !key.is_routable() {
            return SpecialistReport::unrouted();
        }

        let Some(specialist) = self.specialists.get(&key) else {
            warn!(agent = %key, "No specialist registered for routed key");
            return SpecialistReport::failure(key, "no specialist registered");
        };

        info!(agent = %key, "Executing specialist");
        match specialist.investigate(issue).await {
            Ok(text) => SpecialistReport::success(key, specialist.name(), text),
            Err(e) => {
                error!(agent = %key, error = %e, "Specialist execution failed");
                SpecialistReport::failure(key, e.to_string())
            }
        }
    }

    /// Process one turn end-to-end: stream the orchestrator's commentary on
    /// the session thread, then route and dispatch the issue.
    ///
    /// Commentary failures degrade to text like every other failure; the
    /// routed specialist still runs.
    pub async fn respond<F>(&self, session: &mut Session, issue: &str, on_chunk: F) -> TurnOutcome
    where
        F: FnMut(&str),
    {
        let commentary = match session
            .converse(ORCHESTRATOR_SYSTEM_PROMPT, issue, on_chunk)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Orchestrator commentary unavailable");
                format!("Completion service unavailable: {e}")
            }
        };

        let key = self.route(issue);
        let report = self.dispatch(key, issue).await;

        TurnOutcome {
            commentary,
            key,
            report,
        }
    }

    /// Number of registered specialists.
    pub fn specialist_count(&self) -> usize {
        self.specialists.len()
    }
}
