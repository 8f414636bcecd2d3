//! HTTP route handlers for the mock completion service.

use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub live_threads: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        live_threads: state.live_threads(),
    })
}

/// Completion request body.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub input: String,
    #[serde(default)]
    pub parameters: QueryParameters,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryParameters {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Completion response body (non-streaming).
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub output: String,
    pub thread_id: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Simulated completion: keyword-matched canned outputs.
pub fn canned_output(prompt: &str) -> &'static str {
    let prompt = prompt.trim().to_lowercase();

    if prompt.contains("cooling") {
        if prompt.contains("30") {
            "Increase cooling to handle rising temperatures."
        } else {
            "Maintain current cooling settings."
        }
    } else if prompt.contains("access") || prompt.contains("failed attempts") {
        if prompt.contains("4") {
            "Alert Admin due to repeated failed access attempts."
        } else {
            "Allow access."
        }
    } else if prompt.contains("maintenance") || prompt.contains("uptime") {
        if prompt.contains("16000") {
            "Schedule Maintenance soon."
        } else {
            "No Action required."
        }
    } else if prompt.contains("carbon") || prompt.contains("compliance") {
        if prompt.contains("80") {
            "Violation Detected."
        } else {
            "Compliant"
        }
    } else if prompt.contains("resource") || prompt.contains("bandwidth") {
        if prompt.contains("underutilized") {
            "Scale Down."
        } else {
            "Maintain Current Allocation"
        }
    } else if prompt.contains("energy") {
        if prompt.contains("95") {
            "Reduce load during peak hours to save energy."
        } else {
            "No action needed."
        }
    } else {
        "Maintain default operation."
    }
}

/// Split an output into NDJSON chunk lines: one word per chunk, the thread
/// id on the first line, and a closing `done` marker.
pub fn chunk_lines(output: &str, thread_id: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, piece) in output.split_inclusive(' ').enumerate() {
        let value = if i == 0 {
            serde_json::json!({"chunk": piece, "thread_id": thread_id, "done": false})
        } else {
            serde_json::json!({"chunk": piece, "done": false})
        };
        lines.push(format!("{value}\n"));
    }

    if lines.is_empty() {
        lines.push(format!(
            "{}\n",
            serde_json::json!({"chunk": "", "thread_id": thread_id, "done": false})
        ));
    }

    lines.push(format!("{}\n", serde_json::json!({"done": true})));
    lines
}

pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    info!(
        input_preview = %request.input.chars().take(50).collect::<String>(),
        stream = request.stream,
        "Received completion query"
    );

    let thread_id = state.ensure_thread(request.thread_id.clone());
    let output = canned_output(&request.input);

    if request.stream {
        let lines = chunk_lines(output, &thread_id);
        let body = Body::from_stream(futures_util::stream::iter(
            lines
                .into_iter()
                .map(Ok::<_, std::convert::Infallible>),
        ));
        return (
            [(header::CONTENT_TYPE, "application/x-ndjson")],
            body,
        )
            .into_response();
    }

    Json(QueryResponse {
        output: output.to_string(),
        thread_id,
    })
    .into_response()
}

pub async fn release_thread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    debug!(thread = %id, "Thread release requested");

    if state.release_thread(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("unknown thread: {id}"),
            }),
        )
            .into_response()
    }
}
