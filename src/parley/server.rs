//! HTTP surface for debates.
//!
//! `POST /debate` starts a session and streams its events back as NDJSON —
//! one JSON object per line, flushed as produced, terminated by a single
//! `{"type": "Done"}` or `{"type": "Error", ...}` line. `GET /health` answers
//! liveness probes.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream;
use serde::Deserialize;
use serde_json::json;

use crate::parley::event_stream::{EventSubscriber, StreamFrame};
use crate::parley::orchestrator::DebateOrchestrator;

/// Body of `POST /debate`.
#[derive(Debug, Deserialize)]
pub struct DebateRequest {
    pub question: String,
    /// Number of debate rounds; must be at least 1.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
}

fn default_rounds() -> usize {
    2
}

/// Build the application router around a shared orchestrator.
pub fn router(orchestrator: Arc<DebateOrchestrator>) -> Router {
    Router::new()
        .route("/debate", post(start_debate))
        .route("/health", get(health))
        .with_state(orchestrator)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn start_debate(
    State(orchestrator): State<Arc<DebateOrchestrator>>,
    Json(request): Json<DebateRequest>,
) -> Response {
    if request.question.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "question must not be empty" })),
        )
            .into_response();
    }

    match orchestrator.start_debate(request.question, request.rounds) {
        Ok(subscriber) => (
            [(header::CONTENT_TYPE, "application/x-ndjson")],
            ndjson_body(subscriber),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Turn the session's frame stream into a chunked NDJSON body. The stream
/// ends after the first terminal frame because the producer drops its sender
/// right after emitting it.
fn ndjson_body(subscriber: EventSubscriber) -> Body {
    Body::from_stream(stream::unfold(subscriber, |mut subscriber| async move {
        let frame = subscriber.next_frame().await?;
        Some((Ok::<_, Infallible>(frame_to_line(&frame)), subscriber))
    }))
}

/// One wire line per frame, newline-terminated.
fn frame_to_line(frame: &StreamFrame) -> String {
    let value = match frame {
        StreamFrame::Event(event) => serde_json::to_value(event)
            .unwrap_or_else(|e| json!({ "type": "Error", "message": e.to_string() })),
        StreamFrame::Completed => json!({ "type": "Done" }),
        StreamFrame::Failed(message) => json!({ "type": "Error", "message": message }),
    };
    format!("{}\n", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parley::provider::Provider;
    use crate::parley::transcript::DebateEvent;

    #[test]
    fn event_frames_serialize_with_a_type_tag() {
        let line = frame_to_line(&StreamFrame::Event(DebateEvent::ProviderTurnStarted {
            model: Provider::Anthropic,
        }));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["type"], "ProviderTurnStarted");
        assert_eq!(value["model"], "Anthropic");
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn terminal_frames_use_the_reserved_type_tags() {
        assert_eq!(frame_to_line(&StreamFrame::Completed), "{\"type\":\"Done\"}\n");

        let line = frame_to_line(&StreamFrame::Failed("arbiter unavailable".into()));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["type"], "Error");
        assert_eq!(value["message"], "arbiter unavailable");
    }

    #[test]
    fn request_rounds_default_when_omitted() {
        let request: DebateRequest =
            serde_json::from_str(r#"{"question": "Is water wet?"}"#).unwrap();
        assert_eq!(request.rounds, 2);
    }
}
