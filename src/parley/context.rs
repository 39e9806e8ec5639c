//! Context reconstruction: the pure projection from (transcript, agent) to
//! the role-tagged message sequence that primes a turn.
//!
//! Every turn is a stateless call. An agent sees its own prior responses as
//! assistant output (preserving continuity), everyone else's as observer
//! messages prefixed with the author's display name, and search invocations
//! as informational notes. Given the same transcript prefix and target agent,
//! the projection is byte-identical every time — the builder captures the
//! question and session date once at construction.

use chrono::Utc;

use crate::parley::client_wrapper::Message;
use crate::parley::provider::Provider;
use crate::parley::transcript::{DebateEvent, Transcript};

/// Builds per-turn message sequences for one debate session.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    question: String,
    session_date: String,
}

impl ContextBuilder {
    pub fn new(question: impl Into<String>) -> Self {
        ContextBuilder {
            question: question.into(),
            session_date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// System prompt for a participant's turn. The search-tool section is
    /// appended only when the turn carries a bound tool.
    pub fn debate_system_prompt(&self, with_search_tool: bool) -> String {
        let mut prompt = format!(
            "You are an expert AI agent participating in a collaborative debate. \
             You have full authority to decide how to handle the question.\n\
             \n\
             CONTEXT:\n\
             - Current date: {}\n\
             - This is a structured debate format - build upon previous contributions\n\
             \n\
             RULES:\n\
             1. NEVER ask the user for clarification or additional information\n\
             2. NEVER say you cannot answer - work with what you have\n\
             3. Build upon valuable insights from other participants\n\
             4. Identify and address gaps or weaknesses in previous contributions\n\
             5. Focus on adding novel information rather than repeating established points",
            self.session_date
        );

        if with_search_tool {
            prompt.push_str(
                "\n\nYou have access to the following tool:\n\
                 - browse_internet: Search the internet for information on a specific \
                 query. Returns results with titles, links, snippets and page content.\n\
                 \n\
                 To use it, respond with a JSON object in the following format:\n\
                 {\"tool_call\": {\"name\": \"browse_internet\", \"parameters\": \
                 {\"search_query\": \"...\"}}}\n\
                 After the search executes, the results will be provided and you can \
                 continue your response. Craft specific, targeted queries and \
                 incorporate what you find with attribution.",
            );
        }

        prompt
    }

    /// Replay the transcript into the message sequence for `for_agent`'s next
    /// turn.
    pub fn build(&self, transcript: &Transcript, for_agent: Provider) -> Vec<Message> {
        if transcript.is_empty() {
            return vec![Message::user(self.question.clone())];
        }

        let mut messages = Vec::with_capacity(transcript.len() + 1);
        for event in transcript.events() {
            match event {
                DebateEvent::ToolInvocation { model, query, results } => {
                    let serialized =
                        serde_json::to_string(results).unwrap_or_else(|_| String::from("[]"));
                    messages.push(Message::user(format!(
                        "{} searched for \"{}\"; results: {}",
                        model.display_name(),
                        query,
                        serialized
                    )));
                }
                DebateEvent::AgentResponse { model, text, .. } => {
                    if *model == for_agent {
                        messages.push(Message::assistant(text.clone()));
                    } else {
                        messages.push(Message::user(format!(
                            "{}: {}",
                            model.display_name(),
                            text
                        )));
                    }
                }
                // Turn markers and round boundaries carry no conversational content.
                DebateEvent::ProviderTurnStarted { .. }
                | DebateEvent::ProviderTurnFailed { .. }
                | DebateEvent::RoundCompleted { .. } => {}
            }
        }

        messages.push(Message::user(format!(
            "Continue the debate with your next contribution. Do not comment on the \
             debate format itself. The question under debate is: {}",
            self.question
        )));

        messages
    }

    /// Message sequence for the arbiter's per-round consensus. Unlike
    /// participant turns, the arbiter sees the whole multi-party record at
    /// once; turn markers and round boundaries are filtered out of the
    /// payload since they carry no conversational content.
    pub fn arbiter_messages(&self, transcript: &Transcript) -> Vec<Message> {
        let system = format!(
            "You are the final autonomous arbiter in a collaborative debate. \
             Review all previous responses and provide a comprehensive, balanced consensus.\n\
             \n\
             CONTEXT:\n\
             - Current date: {}\n\
             - This is a one-off query - you cannot ask for clarification\n\
             \n\
             RULES:\n\
             1. Synthesize key points from all participants' responses\n\
             2. Identify areas of strong consensus and notable disagreements\n\
             3. Evaluate the strength of evidence presented\n\
             4. Provide a clear, actionable conclusion\n\
             5. Maintain objectivity and fairness to all viewpoints\n\
             6. Highlight any remaining uncertainties or open questions",
            self.session_date
        );

        let contributions: Vec<&DebateEvent> = transcript
            .events()
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    DebateEvent::ToolInvocation { .. } | DebateEvent::AgentResponse { .. }
                )
            })
            .collect();
        let serialized = serde_json::to_string_pretty(&contributions)
            .unwrap_or_else(|_| String::from("[]"));

        vec![
            Message::system(system),
            Message::user(format!(
                "Please provide a consensus for this round based on the debate so far:\n{}",
                serialized
            )),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.append(DebateEvent::ProviderTurnStarted {
            model: Provider::OpenAi,
        });
        transcript.append(DebateEvent::ToolInvocation {
            model: Provider::OpenAi,
            query: "rust async channels".into(),
            results: vec![],
        });
        transcript.append(DebateEvent::AgentResponse {
            model: Provider::OpenAi,
            text: "channels decouple producers from consumers".into(),
            round_number: None,
        });
        transcript.append(DebateEvent::AgentResponse {
            model: Provider::Google,
            text: "agreed, with caveats on buffering".into(),
            round_number: None,
        });
        transcript
    }

    #[test]
    fn empty_transcript_yields_only_the_question() {
        let builder = ContextBuilder::new("What color is the sky?");
        let messages = builder.build(&Transcript::new(), Provider::OpenAi);
        assert_eq!(messages, vec![Message::user("What color is the sky?")]);
    }

    #[test]
    fn own_responses_replay_as_assistant_messages() {
        let builder = ContextBuilder::new("q");
        let messages = builder.build(&sample_transcript(), Provider::OpenAi);

        // tool note, own response, observed response, trailing instruction
        assert_eq!(messages.len(), 4);
        assert_eq!(
            messages[1],
            Message::assistant("channels decouple producers from consumers")
        );
        assert_eq!(
            messages[2],
            Message::user("Google: agreed, with caveats on buffering")
        );
    }

    #[test]
    fn other_agents_see_the_same_response_as_observer_message() {
        let builder = ContextBuilder::new("q");
        let messages = builder.build(&sample_transcript(), Provider::Google);
        assert_eq!(
            messages[1],
            Message::user("OpenAI: channels decouple producers from consumers")
        );
        assert_eq!(
            messages[2],
            Message::assistant("agreed, with caveats on buffering")
        );
    }

    #[test]
    fn reconstruction_is_deterministic() {
        let builder = ContextBuilder::new("q");
        let transcript = sample_transcript();
        let first = builder.build(&transcript, Provider::XAi);
        let second = builder.build(&transcript, Provider::XAi);
        assert_eq!(first, second);
    }

    #[test]
    fn arbiter_payload_carries_contributions_but_not_markers() {
        let builder = ContextBuilder::new("q");
        let mut transcript = sample_transcript();
        transcript.append(DebateEvent::RoundCompleted { round_number: 0 });

        let messages = builder.arbiter_messages(&transcript);
        assert_eq!(messages.len(), 2);
        let payload = &messages[1].content;
        assert!(payload.contains("channels decouple producers from consumers"));
        assert!(payload.contains("rust async channels"));
        assert!(!payload.contains("ProviderTurnStarted"));
        assert!(!payload.contains("RoundCompleted"));
    }

    #[test]
    fn trailing_instruction_restates_the_question() {
        let builder = ContextBuilder::new("Is water wet?");
        let messages = builder.build(&sample_transcript(), Provider::OpenAi);
        let last = &messages[messages.len() - 1];
        assert!(last.content.contains("Is water wet?"));
    }
}
