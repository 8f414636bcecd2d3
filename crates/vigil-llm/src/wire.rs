//! Wire format shared by the completion providers.
//!
//! The remote and local endpoints speak the same request shape; only the
//! base URL and authentication differ.

use crate::stream::StreamChunk;
use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;
use vigil_common::{Result, VigilError};

#[derive(Debug, Serialize)]
pub(crate) struct QueryBody {
    pub input: String,
    pub parameters: QueryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryParameters {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Extract the completion text and thread id from a reply.
///
/// Accepts either the service's native form `{"output": "...", "thread_id":
/// "..."}` or an OpenAI-style `{"choices": [{"text": "..."}]}` body.
pub(crate) fn parse_reply(value: serde_json::Value) -> Result<(String, Option<String>)> {
    let thread_id = value
        .get("thread_id")
        .and_then(|v| v.as_str())
        .map(String::from);

    if let Some(output) = value.get("output").and_then(|v| v.as_str()) {
        return Ok((output.to_string(), thread_id));
    }

    if let Some(text) = value
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("text"))
        .and_then(|t| t.as_str())
    {
        return Ok((text.trim().to_string(), thread_id));
    }

    Err(VigilError::Completion(
        "no output received from completion service".into(),
    ))
}

/// Read an NDJSON response body and forward one [`StreamChunk`] per line.
///
/// Chunks are sent in arrival order; a send failure means the receiver was
/// dropped and the remaining body is abandoned.
pub(crate) async fn pump_ndjson(
    response: reqwest::Response,
    tx: mpsc::Sender<Result<StreamChunk>>,
) {
    let mut body = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(piece) = body.next().await {
        let bytes = match piece {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = tx
                    .send(Err(VigilError::Completion(format!(
                        "stream interrupted: {e}"
                    ))))
                    .await;
                return;
            }
        };

        match std::str::from_utf8(&bytes) {
            Ok(text) => buffer.push_str(text),
            Err(e) => {
                let _ = tx
                    .send(Err(VigilError::Completion(format!(
                        "non-UTF8 stream data: {e}"
                    ))))
                    .await;
                return;
            }
        }

        while let Some(pos) = buffer.find('\n') {
            let line = buffer[..pos].trim().to_string();
            buffer.drain(..=pos);

            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<StreamChunk>(&line) {
                Ok(chunk) => {
                    let done = chunk.done;
                    if tx.send(Ok(chunk)).await.is_err() {
                        return; // receiver dropped, abandon the rest
                    }
                    if done {
                        return;
                    }
                }
                Err(e) => {
                    let _ = tx
                        .send(Err(VigilError::Completion(format!(
                            "malformed stream line: {e}"
                        ))))
                        .await;
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_native_reply() {
        let (text, thread) = parse_reply(json!({
            "output": "Reduce load during peak hours to save energy.",
            "thread_id": "t-42"
        }))
        .unwrap();
        assert_eq!(text, "Reduce load during peak hours to save energy.");
        assert_eq!(thread.as_deref(), Some("t-42"));
    }

    #[test]
    fn parse_openai_style_reply() {
        let (text, thread) = parse_reply(json!({
            "choices": [{"text": "  Maintain current cooling settings.  "}]
        }))
        .unwrap();
        assert_eq!(text, "Maintain current cooling settings.");
        assert!(thread.is_none());
    }

    #[test]
    fn parse_reply_without_output_fails() {
        let err = parse_reply(json!({"status": "ok"})).unwrap_err();
        assert!(err.to_string().contains("no output"));
    }

    #[test]
    fn query_body_omits_empty_fields() {
        let body = QueryBody {
            input: "hello".into(),
            parameters: QueryParameters {
                temperature: 0.7,
                max_tokens: None,
            },
            system: None,
            thread_id: None,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["input"], "hello");
        assert!(json.get("system").is_none());
        assert!(json.get("thread_id").is_none());
        assert!(json.get("stream").is_none());
    }

    #[test]
    fn query_body_keeps_stream_flag_when_set() {
        let body = QueryBody {
            input: "hello".into(),
            parameters: QueryParameters {
                temperature: 0.2,
                max_tokens: Some(256),
            },
            system: Some("sys".into()),
            thread_id: Some("t-1".into()),
            stream: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], true);
        assert_eq!(json["thread_id"], "t-1");
        assert_eq!(json["parameters"]["max_tokens"], 256);
    }
}
