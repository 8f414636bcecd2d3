//! Issue routing and execution coordination for Vigil.
//!
//! The orchestrator is the central piece that:
//! 1. Receives free-text issue descriptions
//! 2. Keyword-routes each issue to one of six specialist agents
//! 3. Invokes the routed specialist's analysis pipeline
//! 4. Maintains the conversation thread across turns and releases it on exit
//!
//! # Architecture
//!
//! ```text
//! Issue text
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  Orchestrator   │ ◄── ordered keyword rule table
//! │  (this crate)   │
//! └────────┬────────┘
//!          │
//!    ┌─────┴─────┬──────────┬────────────┬────────────┬──────────┐
//!    ▼           ▼          ▼            ▼            ▼          ▼
//! [Energy]   [Cooling]  [Security] [Maintenance] [Compliance] [Resource]
//!  Agent      Agent       Agent       Agent         Agent       Agent
//! ```

pub mod config;
pub mod orchestrator;
pub mod routing;
pub mod session;

pub use config::OrchestratorConfig;
pub use orchestrator::{Orchestrator, TurnOutcome};
pub use routing::{RouteRule, Router, ROUTE_RULES};
pub use session::Session;
