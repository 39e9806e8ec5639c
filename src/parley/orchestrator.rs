//! The debate orchestrator: drives N rounds of M participating agents over a
//! shared append-only transcript, lets a turn invoke web search mid-flight,
//! synthesizes a per-round consensus through a distinguished arbiter, and
//! forwards every state transition to the session's live event stream.
//!
//! One session is one independent sequential task. There is no parallelism
//! within a session — each turn's context depends on every prior transcript
//! entry — and no shared mutable state between sessions.
//!
//! Failure policy: a participant's failed turn is logged and skipped (the
//! debate continues); a failed arbiter synthesis is fatal, because a round
//! without consensus has no terminating event.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::parley::client_wrapper::{Message, ProviderError};
use crate::parley::context::ContextBuilder;
use crate::parley::event_stream::{event_stream, EventStream, EventSubscriber};
use crate::parley::provider::{Provider, ProviderRegistry};
use crate::parley::question_log::{NoopQuestionLog, QuestionLog};
use crate::parley::search::SearchClient;
use crate::parley::transcript::{DebateEvent, Transcript};

/// Name under which the search capability is exposed to agents.
pub const SEARCH_TOOL_NAME: &str = "browse_internet";

/// Cap on search round-trips within a single turn.
const MAX_TOOL_ITERATIONS: usize = 3;

/// What a running session does when its stream consumer disconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectPolicy {
    /// Source-parity default: keep debating into the void. The session holds
    /// its resources until it finishes on its own.
    RunToCompletion,
    /// Check the stream before each turn, before each search round-trip, and
    /// before arbiter synthesis; abandon the session cooperatively once
    /// nobody is listening.
    StopWhenDisconnected,
}

/// Lifecycle state of one debate session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Completed,
    Failed,
    /// The consumer disconnected and the cooperative policy stopped the
    /// session before it could finish.
    Abandoned,
}

/// Errors raised when a debate cannot be set up or cannot continue.
#[derive(Debug)]
pub enum DebateError {
    /// `rounds` must be at least 1.
    InvalidRounds(usize),
    NoParticipants,
    /// Participant membership is fixed and duplicate-free.
    DuplicateParticipant(Provider),
    /// The arbiter call failed; the session aborts.
    ArbiterFailed { round: usize, source: ProviderError },
}

impl fmt::Display for DebateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebateError::InvalidRounds(rounds) => {
                write!(f, "rounds must be >= 1, got {}", rounds)
            }
            DebateError::NoParticipants => write!(f, "no participants in debate"),
            DebateError::DuplicateParticipant(provider) => {
                write!(f, "duplicate participant: {}", provider.display_name())
            }
            DebateError::ArbiterFailed { round, source } => {
                write!(f, "consensus failed for round {}: {}", round, source)
            }
        }
    }
}

impl std::error::Error for DebateError {}

/// Ephemeral state of one debate, created per client request and destroyed
/// when its stream closes. Never persisted.
pub struct DebateSession {
    pub id: Uuid,
    pub question: String,
    pub total_rounds: usize,
    pub participants: Vec<Provider>,
    pub arbiter: Provider,
    pub transcript: Transcript,
    pub status: SessionStatus,
}

impl DebateSession {
    /// Validate and create a session. Membership is fixed for the session's
    /// lifetime and duplicates are rejected.
    pub fn new(
        question: impl Into<String>,
        total_rounds: usize,
        participants: Vec<Provider>,
        arbiter: Provider,
    ) -> Result<Self, DebateError> {
        if total_rounds < 1 {
            return Err(DebateError::InvalidRounds(total_rounds));
        }
        if participants.is_empty() {
            return Err(DebateError::NoParticipants);
        }
        let mut seen = HashSet::new();
        for provider in &participants {
            if !seen.insert(*provider) {
                return Err(DebateError::DuplicateParticipant(*provider));
            }
        }
        Ok(DebateSession {
            id: Uuid::new_v4(),
            question: question.into(),
            total_rounds,
            participants,
            arbiter,
            transcript: Transcript::new(),
            status: SessionStatus::Running,
        })
    }
}

/// How a participant turn ended, short of a provider error.
enum TurnOutcome {
    Response(String),
    /// The consumer disconnected mid-turn under the cooperative policy.
    Abandoned,
}

/// Parsed search-tool request extracted from an agent's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchToolCall {
    query: String,
}

/// Look for `{"tool_call": {"name": "browse_internet", "parameters":
/// {"search_query": "..."}}}` anywhere in the reply. Brace matching does not
/// account for braces inside string literals; models that want the tool emit
/// the object verbatim.
fn parse_tool_call(response: &str) -> Option<SearchToolCall> {
    let start = response.find("{\"tool_call\"")?;
    let mut depth = 0usize;
    let mut end = None;
    for (offset, ch) in response[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(start + offset + ch.len_utf8());
                    break;
                }
            }
            _ => {}
        }
    }

    let parsed: serde_json::Value = serde_json::from_str(&response[start..end?]).ok()?;
    let call = parsed.get("tool_call")?;
    if call.get("name")?.as_str()? != SEARCH_TOOL_NAME {
        return None;
    }
    let query = call.get("parameters")?.get("search_query")?.as_str()?;
    Some(SearchToolCall {
        query: query.to_string(),
    })
}

/// Drives debate sessions. One orchestrator is shared by all sessions; each
/// `start_debate` call spawns an independent task.
pub struct DebateOrchestrator {
    registry: Arc<ProviderRegistry>,
    search: Arc<dyn SearchClient>,
    question_log: Arc<dyn QuestionLog>,
    participants: Vec<Provider>,
    arbiter: Provider,
    disconnect_policy: DisconnectPolicy,
    surface_turn_failures: bool,
}

impl DebateOrchestrator {
    /// Create an orchestrator with the default roster: OpenAI and Google
    /// debate, OpenAI arbitrates.
    pub fn new(registry: Arc<ProviderRegistry>, search: Arc<dyn SearchClient>) -> Self {
        DebateOrchestrator {
            registry,
            search,
            question_log: Arc::new(NoopQuestionLog),
            participants: vec![Provider::OpenAi, Provider::Google],
            arbiter: Provider::OpenAi,
            disconnect_policy: DisconnectPolicy::RunToCompletion,
            surface_turn_failures: false,
        }
    }

    /// Replace the participant roster (fixed turn order).
    pub fn with_participants(mut self, participants: Vec<Provider>) -> Self {
        self.participants = participants;
        self
    }

    /// Replace the arbiter identity.
    pub fn with_arbiter(mut self, arbiter: Provider) -> Self {
        self.arbiter = arbiter;
        self
    }

    pub fn with_question_log(mut self, question_log: Arc<dyn QuestionLog>) -> Self {
        self.question_log = question_log;
        self
    }

    pub fn with_disconnect_policy(mut self, policy: DisconnectPolicy) -> Self {
        self.disconnect_policy = policy;
        self
    }

    /// Emit `ProviderTurnFailed` events instead of dropping failed turns
    /// silently.
    pub fn with_surface_turn_failures(mut self, surface: bool) -> Self {
        self.surface_turn_failures = surface;
        self
    }

    /// Validate the request, spawn the session task, and hand back the
    /// consumer half of its live stream.
    pub fn start_debate(
        self: &Arc<Self>,
        question: impl Into<String>,
        rounds: usize,
    ) -> Result<EventSubscriber, DebateError> {
        let session = DebateSession::new(
            question,
            rounds,
            self.participants.clone(),
            self.arbiter,
        )?;
        let (stream, subscriber) = event_stream();

        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            let session = orchestrator.run_session(session, stream).await;
            log::info!(
                "debate session {} finished with status {:?} after {} events",
                session.id,
                session.status,
                session.transcript.len()
            );
        });

        Ok(subscriber)
    }

    /// Run one session to completion (or fatal failure), appending every
    /// event to the transcript and pushing it to the stream in the same
    /// order. Returns the final session state.
    pub async fn run_session(
        &self,
        mut session: DebateSession,
        stream: EventStream,
    ) -> DebateSession {
        log::info!(
            "debate session {} starting: {} rounds, {} participants, arbiter {}",
            session.id,
            session.total_rounds,
            session.participants.len(),
            session.arbiter.display_name()
        );

        // Fire-and-forget; the session never waits on the log.
        {
            let question_log = Arc::clone(&self.question_log);
            let question = session.question.clone();
            tokio::spawn(async move {
                question_log.record(&question).await;
            });
        }

        let builder = ContextBuilder::new(session.question.clone());

        for round in 0..session.total_rounds {
            for provider in session.participants.clone() {
                if self.abandoned(&stream) {
                    return self.abandon(session);
                }

                self.emit(
                    &mut session,
                    &stream,
                    DebateEvent::ProviderTurnStarted { model: provider },
                );

                match self.run_turn(provider, &builder, &mut session, &stream).await {
                    Ok(TurnOutcome::Abandoned) => return self.abandon(session),
                    Ok(TurnOutcome::Response(text)) => {
                        self.emit(
                            &mut session,
                            &stream,
                            DebateEvent::AgentResponse {
                                model: provider,
                                text,
                                round_number: None,
                            },
                        );
                    }
                    Err(e) => {
                        // Best-effort: one agent's failure never aborts the
                        // session.
                        log::warn!(
                            "session {}: turn failed for {} in round {}: {}",
                            session.id,
                            provider.display_name(),
                            round,
                            e
                        );
                        if self.surface_turn_failures {
                            self.emit(
                                &mut session,
                                &stream,
                                DebateEvent::ProviderTurnFailed {
                                    model: provider,
                                    error: e.to_string(),
                                },
                            );
                        }
                    }
                }
            }

            if self.abandoned(&stream) {
                return self.abandon(session);
            }

            // The arbiter always sees the full multi-party record.
            let arbiter = session.arbiter;
            let messages = builder.arbiter_messages(&session.transcript);
            match self.generate(arbiter, &messages).await {
                Ok(text) => {
                    self.emit(
                        &mut session,
                        &stream,
                        DebateEvent::AgentResponse {
                            model: arbiter,
                            text,
                            round_number: Some(round),
                        },
                    );
                    self.emit(
                        &mut session,
                        &stream,
                        DebateEvent::RoundCompleted {
                            round_number: round,
                        },
                    );
                }
                Err(source) => {
                    let error = DebateError::ArbiterFailed { round, source };
                    log::error!("session {}: {}", session.id, error);
                    session.status = SessionStatus::Failed;
                    stream.fail(error.to_string());
                    return session;
                }
            }
        }

        session.status = SessionStatus::Completed;
        stream.complete();
        session
    }

    /// One participant turn: prime the context, let the model speak, and
    /// service `browse_internet` calls until it produces final text. The
    /// `ToolInvocation` side-channel event is appended and pushed the moment
    /// each search returns — before the turn's final text exists.
    async fn run_turn(
        &self,
        provider: Provider,
        builder: &ContextBuilder,
        session: &mut DebateSession,
        stream: &EventStream,
    ) -> Result<TurnOutcome, ProviderError> {
        let client = self.registry.client(provider)?;

        let mut messages = vec![Message::system(builder.debate_system_prompt(true))];
        messages.extend(builder.build(&session.transcript, provider));

        let mut tool_iterations = 0;
        loop {
            let response = client.send_message(&messages).await?;

            let call = match parse_tool_call(&response.content) {
                Some(call) => call,
                None => return Ok(TurnOutcome::Response(response.content)),
            };

            // Nobody is listening; skip the search round-trip entirely.
            if self.abandoned(stream) {
                return Ok(TurnOutcome::Abandoned);
            }

            if tool_iterations >= MAX_TOOL_ITERATIONS {
                // A model stuck requesting searches; return what we have.
                return Ok(TurnOutcome::Response(format!(
                    "{}\n\n[Warning: Maximum tool iterations reached]",
                    response.content
                )));
            }
            tool_iterations += 1;

            let results = self.search.search(&call.query).await;
            self.emit(
                session,
                stream,
                DebateEvent::ToolInvocation {
                    model: provider,
                    query: call.query.clone(),
                    results: results.clone(),
                },
            );

            let serialized =
                serde_json::to_string(&results).unwrap_or_else(|_| String::from("[]"));
            messages.push(Message::assistant(response.content.clone()));
            messages.push(Message::user(format!(
                "Tool '{}' executed. Results: {}",
                SEARCH_TOOL_NAME, serialized
            )));
        }
    }

    async fn generate(
        &self,
        provider: Provider,
        messages: &[Message],
    ) -> Result<String, ProviderError> {
        let client = self.registry.client(provider)?;
        let response = client.send_message(messages).await?;
        Ok(response.content)
    }

    /// Append to the transcript and push to the live stream, in that order.
    fn emit(&self, session: &mut DebateSession, stream: &EventStream, event: DebateEvent) {
        session.transcript.append(event.clone());
        stream.push(event);
    }

    /// Whether the cooperative disconnect policy says to stop now.
    fn abandoned(&self, stream: &EventStream) -> bool {
        self.disconnect_policy == DisconnectPolicy::StopWhenDisconnected && stream.is_closed()
    }

    fn abandon(&self, mut session: DebateSession) -> DebateSession {
        log::info!(
            "session {}: consumer disconnected, abandoning debate",
            session.id
        );
        session.status = SessionStatus::Abandoned;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_tool_call() {
        let reply = r#"Let me check. {"tool_call": {"name": "browse_internet", "parameters": {"search_query": "rust 1.80 release date"}}}"#;
        let call = parse_tool_call(reply).unwrap();
        assert_eq!(call.query, "rust 1.80 release date");
    }

    #[test]
    fn ignores_unknown_tools_and_plain_text() {
        assert!(parse_tool_call("no tools here").is_none());
        let other = r#"{"tool_call": {"name": "calculator", "parameters": {"search_query": "2+2"}}}"#;
        assert!(parse_tool_call(other).is_none());
        let malformed = r#"{"tool_call": {"name": "browse_internet""#;
        assert!(parse_tool_call(malformed).is_none());
    }

    #[test]
    fn session_rejects_invalid_setups() {
        assert!(matches!(
            DebateSession::new("q", 0, vec![Provider::OpenAi], Provider::OpenAi),
            Err(DebateError::InvalidRounds(0))
        ));
        assert!(matches!(
            DebateSession::new("q", 1, vec![], Provider::OpenAi),
            Err(DebateError::NoParticipants)
        ));
        assert!(matches!(
            DebateSession::new(
                "q",
                1,
                vec![Provider::Groq, Provider::Groq],
                Provider::OpenAi
            ),
            Err(DebateError::DuplicateParticipant(Provider::Groq))
        ));
    }
}
