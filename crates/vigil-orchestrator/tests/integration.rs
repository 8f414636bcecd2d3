//! Integration tests for the orchestrator's route, dispatch, and session
//! lifecycle.
//!
//! These tests use scripted doubles for the completion client and the
//! specialists, so they run without any endpoint.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vigil_common::{AgentKey, Result, Specialist, VigilError};
use vigil_llm::{
    CompletionClient, CompletionRequest, CompletionResponse, CompletionStream, StreamChunk,
    ThreadHandle,
};
use vigil_orchestrator::Orchestrator;

/// Completion client double that issues one thread id per session and
/// counts stream starts and thread releases.
struct CountingClient {
    streams_started: AtomicUsize,
    threads_issued: AtomicUsize,
    threads_released: AtomicUsize,
    fail_streams: bool,
}

impl CountingClient {
    fn new() -> Self {
        Self {
            streams_started: AtomicUsize::new(0),
            threads_issued: AtomicUsize::new(0),
            threads_released: AtomicUsize::new(0),
            fail_streams: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_streams: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl CompletionClient for CountingClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        Ok(CompletionResponse {
            content: "scripted".into(),
            thread: None,
        })
    }

    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream> {
        if self.fail_streams {
            return Err(VigilError::Completion("endpoint unreachable".into()));
        }

        self.streams_started.fetch_add(1, Ordering::SeqCst);

        // Issue a fresh thread only when the request continues none,
        // mirroring the real service.
        let thread_id = if request.thread.is_none() {
            let n = self.threads_issued.fetch_add(1, Ordering::SeqCst) + 1;
            Some(format!("thread-{n}"))
        } else {
            None
        };

        let (tx, stream) = CompletionStream::channel(4);
        tokio::spawn(async move {
            let _ = tx
                .send(Ok(StreamChunk {
                    chunk: "Routing the issue ".into(),
                    thread_id,
                    done: false,
                }))
                .await;
            let _ = tx
                .send(Ok(StreamChunk {
                    chunk: "to a specialist.".into(),
                    thread_id: None,
                    done: false,
                }))
                .await;
            let _ = tx
                .send(Ok(StreamChunk {
                    chunk: String::new(),
                    thread_id: None,
                    done: true,
                }))
                .await;
        });
        Ok(stream)
    }

    async fn release_thread(&self, _thread: &ThreadHandle) -> Result<()> {
        self.threads_released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn endpoint_name(&self) -> &str {
        "counting"
    }
}

/// Specialist double with an invocation counter and scriptable failure.
struct SimulatedSpecialist {
    key: AgentKey,
    name: String,
    invocations: AtomicUsize,
    should_fail: bool,
}

impl SimulatedSpecialist {
    fn new(key: AgentKey) -> Self {
        Self {
            key,
            name: format!("Simulated {key}"),
            invocations: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    fn failing(key: AgentKey) -> Self {
        Self {
            should_fail: true,
            ..Self::new(key)
        }
    }

    fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Specialist for SimulatedSpecialist {
    fn key(&self) -> AgentKey {
        self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn system_prompt(&self) -> &str {
        "You are a simulated specialist."
    }

    async fn investigate(&self, issue: &str) -> Result<String> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(VigilError::Completion("completion call refused".into()));
        }
        Ok(format!("analysis of: {issue}"))
    }
}

fn orchestrator_with(
    client: Arc<CountingClient>,
    specialists: Vec<Arc<SimulatedSpecialist>>,
) -> Orchestrator {
    let dyn_specialists = specialists
        .iter()
        .map(|s| s.clone() as Arc<dyn Specialist>)
        .collect();
    Orchestrator::with_specialists(client as Arc<dyn CompletionClient>, dyn_specialists)
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn energy_issue_routes_to_energy() {
    let orchestrator = orchestrator_with(Arc::new(CountingClient::new()), vec![]);
    assert_eq!(orchestrator.route("energy"), AgentKey::Energy);
    assert_eq!(orchestrator.route("Energy bill doubled"), AgentKey::Energy);
}

#[tokio::test]
async fn cooling_outranks_security() {
    let orchestrator = orchestrator_with(Arc::new(CountingClient::new()), vec![]);
    assert_eq!(
        orchestrator.route("security cameras overheating, cooling failed"),
        AgentKey::Cooling
    );
}

#[tokio::test]
async fn rising_temperature_issue_routes_to_cooling() {
    let orchestrator = orchestrator_with(Arc::new(CountingClient::new()), vec![]);
    assert_eq!(
        orchestrator.route("Increase cooling, temperature is rising"),
        AgentKey::Cooling
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn unknown_issue_returns_sentinel_without_invoking_anyone() {
    let specialists: Vec<Arc<SimulatedSpecialist>> = AgentKey::ROUTABLE
        .iter()
        .map(|&key| Arc::new(SimulatedSpecialist::new(key)))
        .collect();
    let orchestrator =
        orchestrator_with(Arc::new(CountingClient::new()), specialists.clone());

    let key = orchestrator.route("the sky is blue");
    assert_eq!(key, AgentKey::Unknown);

    let report = orchestrator.dispatch(key, "the sky is blue").await;
    assert!(!report.ok);
    assert!(report.content.contains("No appropriate agent"));
    for specialist in &specialists {
        assert_eq!(specialist.invocations(), 0);
    }
}

#[tokio::test]
async fn successful_dispatch_annotates_the_report() {
    let energy = Arc::new(SimulatedSpecialist::new(AgentKey::Energy));
    let orchestrator =
        orchestrator_with(Arc::new(CountingClient::new()), vec![energy.clone()]);

    let report = orchestrator
        .dispatch(AgentKey::Energy, "power spike in row 3")
        .await;

    assert!(report.ok);
    assert_eq!(report.key, AgentKey::Energy);
    assert_eq!(report.agent.as_deref(), Some("Simulated energy"));
    assert!(report.content.contains("power spike in row 3"));
    assert_eq!(energy.invocations(), 1);
}

#[tokio::test]
async fn specialist_failure_becomes_text_not_a_fault() {
    let cooling = Arc::new(SimulatedSpecialist::failing(AgentKey::Cooling));
    let orchestrator =
        orchestrator_with(Arc::new(CountingClient::new()), vec![cooling.clone()]);

    let report = orchestrator
        .dispatch(AgentKey::Cooling, "temperature is rising")
        .await;

    assert!(!report.ok);
    assert!(report.content.contains("cooling"));
    assert!(report.content.contains("completion call refused"));
    assert_eq!(cooling.invocations(), 1);
}

#[tokio::test]
async fn routed_key_without_registered_specialist_degrades() {
    let orchestrator = orchestrator_with(Arc::new(CountingClient::new()), vec![]);
    let report = orchestrator.dispatch(AgentKey::Security, "access denied").await;
    assert!(!report.ok);
    assert!(report.content.contains("security"));
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn one_thread_per_session_across_three_turns() {
    let client = Arc::new(CountingClient::new());
    let energy = Arc::new(SimulatedSpecialist::new(AgentKey::Energy));
    let orchestrator = orchestrator_with(client.clone(), vec![energy]);

    let mut session = orchestrator.open_session();
    for _ in 0..3 {
        let outcome = orchestrator
            .respond(&mut session, "energy usage is spiking", |_| {})
            .await;
        assert_eq!(outcome.key, AgentKey::Energy);
        assert!(outcome.commentary.contains("Routing the issue"));
    }

    // Thread created once, on the first turn; no release before close.
    assert_eq!(client.threads_issued.load(Ordering::SeqCst), 1);
    assert_eq!(client.streams_started.load(Ordering::SeqCst), 3);
    assert_eq!(client.threads_released.load(Ordering::SeqCst), 0);
    assert_eq!(
        session.thread().map(|t| t.id().to_string()),
        Some("thread-1".into())
    );

    session.close().await;
    assert_eq!(client.threads_released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn close_is_idempotent() {
    let client = Arc::new(CountingClient::new());
    let orchestrator = orchestrator_with(client.clone(), vec![]);

    let mut session = orchestrator.open_session();
    orchestrator
        .respond(&mut session, "audit the logs", |_| {})
        .await;

    session.close().await;
    session.close().await;
    assert_eq!(client.threads_released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn close_without_thread_releases_nothing() {
    let client = Arc::new(CountingClient::new());
    let orchestrator = orchestrator_with(client.clone(), vec![]);

    let mut session = orchestrator.open_session();
    session.close().await;
    assert_eq!(client.threads_released.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn commentary_failure_degrades_to_text_and_still_dispatches() {
    let client = Arc::new(CountingClient::failing());
    let energy = Arc::new(SimulatedSpecialist::new(AgentKey::Energy));
    let orchestrator = orchestrator_with(client, vec![energy.clone()]);

    let mut session = orchestrator.open_session();
    let outcome = orchestrator
        .respond(&mut session, "power failure in row 9", |_| {})
        .await;

    assert!(outcome.commentary.contains("Completion service unavailable"));
    assert_eq!(outcome.key, AgentKey::Energy);
    assert_eq!(energy.invocations(), 1);

    session.close().await;
}

#[tokio::test]
async fn streamed_chunks_arrive_in_order() {
    let client = Arc::new(CountingClient::new());
    let orchestrator = orchestrator_with(client, vec![]);

    let mut session = orchestrator.open_session();
    let mut seen = String::new();
    let outcome = orchestrator
        .respond(&mut session, "compliance report due", |chunk| {
            seen.push_str(chunk)
        })
        .await;

    assert_eq!(seen, "Routing the issue to a specialist.");
    assert_eq!(outcome.commentary, seen);

    session.close().await;
}
