//! Local mock completion service.
//!
//! Simulates a completion endpoint with keyword-matched canned outputs so
//! the orchestrator and specialists can run without any real model.
//!
//! # Endpoints
//!
//! - `POST /query` - complete a prompt (set `"stream": true` for NDJSON
//!   chunk delivery)
//! - `DELETE /threads/:id` - release a conversation thread
//! - `GET /health` - health check

pub mod routes;
pub mod state;

pub use routes::{canned_output, chunk_lines};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Build the axum application.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/query", post(routes::query))
        .route("/threads/:id", delete(routes::release_thread))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Mock completion service listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
