//! The debate transcript: an ordered, append-only record of everything that
//! happened in one session.
//!
//! The transcript is the single source of truth. Agents keep no memory of
//! their own; every turn's context is reprojected from the transcript by the
//! [`ContextBuilder`](crate::parley::context::ContextBuilder), so any agent
//! can be retried or replaced without special-casing state.

use serde::{Deserialize, Serialize};

use crate::parley::provider::Provider;
use crate::parley::search::SearchResult;

/// One state transition of a debate session.
///
/// Events are appended to the [`Transcript`] and pushed to the live stream in
/// the same order, so the wire framing below is also the client-visible
/// format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DebateEvent {
    /// Emitted just before a provider is asked to speak.
    ProviderTurnStarted { model: Provider },
    /// Emitted the moment an agent's mid-turn search returns, before the
    /// turn's final text exists.
    ToolInvocation {
        model: Provider,
        query: String,
        results: Vec<SearchResult>,
    },
    /// A participant or arbiter finished a turn. `round_number` is set only
    /// on arbiter consensus responses.
    AgentResponse {
        model: Provider,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        round_number: Option<usize>,
    },
    /// A participant's turn errored out. Only emitted when the session runs
    /// with `surface_turn_failures` enabled; the default policy drops failed
    /// turns silently.
    ProviderTurnFailed { model: Provider, error: String },
    /// A round's consensus was produced; always the last event of its round.
    RoundCompleted { round_number: usize },
}

impl DebateEvent {
    /// The provider that produced this event, if any.
    pub fn author(&self) -> Option<Provider> {
        match self {
            DebateEvent::ProviderTurnStarted { model }
            | DebateEvent::ToolInvocation { model, .. }
            | DebateEvent::AgentResponse { model, .. }
            | DebateEvent::ProviderTurnFailed { model, .. } => Some(*model),
            DebateEvent::RoundCompleted { .. } => None,
        }
    }
}

/// Ordered, append-only event sequence for one debate session.
///
/// Exclusively owned and mutated by its session's task; never mutated in
/// place, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    events: Vec<DebateEvent>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { events: Vec::new() }
    }

    /// Append an event. There is deliberately no way to remove or reorder.
    pub fn append(&mut self, event: DebateEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[DebateEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_number_is_omitted_when_unset() {
        let event = DebateEvent::AgentResponse {
            model: Provider::Google,
            text: "hello".into(),
            round_number: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("roundNumber"));

        let event = DebateEvent::AgentResponse {
            model: Provider::Google,
            text: "hello".into(),
            round_number: Some(2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"roundNumber\":2"));
    }

    #[test]
    fn events_are_tagged_by_type() {
        let event = DebateEvent::RoundCompleted { round_number: 0 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"RoundCompleted\""));
    }

    #[test]
    fn transcript_preserves_append_order() {
        let mut transcript = Transcript::new();
        transcript.append(DebateEvent::ProviderTurnStarted {
            model: Provider::OpenAi,
        });
        transcript.append(DebateEvent::AgentResponse {
            model: Provider::OpenAi,
            text: "first".into(),
            round_number: None,
        });
        assert_eq!(transcript.len(), 2);
        assert_eq!(
            transcript.events()[0].author(),
            Some(Provider::OpenAi)
        );
    }
}
