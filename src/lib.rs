//! # Parley
//!
//! Parley is a Rust engine for running multi-agent LLM debates: several remote
//! models take turns answering the same question, each turn primed with
//! everything said so far, an arbiter synthesizes a consensus after every
//! round, and every state transition streams to the caller live as it happens.
//!
//! The crate is layered as:
//!
//! * **Provider clients**: [`ClientWrapper`] implementations for OpenAI,
//!   Anthropic Claude, xAI Grok, Google Gemini, Groq, and DeepSeek — all riding
//!   the OpenAI-compatible chat surface with per-backend base URLs, resolved
//!   through a [`ProviderRegistry`]
//! * **Debate core**: [`DebateOrchestrator`] drives rounds and turns over an
//!   append-only [`Transcript`], with mid-turn web search via
//!   [`search::SearchClient`]
//! * **Context projection**: [`ContextBuilder`] deterministically replays the
//!   transcript into each agent's role-tagged message sequence
//! * **Live streaming**: [`EventStream`]/[`EventSubscriber`] carry
//!   [`DebateEvent`]s from the session task to the HTTP layer in emission order
//! * **HTTP surface**: [`server::router`] exposes `POST /debate` (NDJSON
//!   stream) and `GET /health`
//!
//! ## Getting Started
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parley::{DebateOrchestrator, Provider, ProviderRegistry};
//! use parley::search::NoopSearchClient;
//! use parley::event_stream::StreamFrame;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     parley::init_logger();
//!
//!     let key = std::env::var("OPENAI_API_KEY")?;
//!     let registry = Arc::new(ProviderRegistry::empty().with_client(
//!         Provider::OpenAi,
//!         Arc::new(parley::clients::openai::OpenAIClient::new_with_model_string(
//!             &key,
//!             "gpt-5-mini",
//!         )),
//!     ));
//!
//!     let orchestrator = Arc::new(
//!         DebateOrchestrator::new(registry, Arc::new(NoopSearchClient))
//!             .with_participants(vec![Provider::OpenAi])
//!             .with_arbiter(Provider::OpenAi),
//!     );
//!
//!     let mut subscriber = orchestrator.start_debate("Is water wet?", 1)?;
//!     while let Some(frame) = subscriber.next_frame().await {
//!         match frame {
//!             StreamFrame::Event(event) => println!("{:?}", event),
//!             StreamFrame::Completed => println!("done"),
//!             StreamFrame::Failed(message) => eprintln!("failed: {}", message),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Lightweight by design so that applications embedding Parley can opt in to
/// simple `RUST_LOG` driven diagnostics without choosing a logging backend
/// upfront.
///
/// ```rust
/// parley::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

pub mod parley;

pub use parley::client_wrapper;
pub use parley::client_wrapper::{ClientWrapper, Message, ProviderError, Role, TokenUsage};
pub use parley::clients;
pub use parley::config;
pub use parley::config::ParleyConfig;
pub use parley::context;
pub use parley::context::ContextBuilder;
pub use parley::event_stream;
pub use parley::event_stream::{EventStream, EventSubscriber, StreamFrame};
pub use parley::orchestrator;
pub use parley::orchestrator::{
    DebateError, DebateOrchestrator, DebateSession, DisconnectPolicy, SessionStatus,
};
pub use parley::provider;
pub use parley::provider::{Provider, ProviderRegistry};
pub use parley::question_log;
pub use parley::question_log::{HttpQuestionLog, NoopQuestionLog, QuestionLog};
pub use parley::search;
pub use parley::search::{NoopSearchClient, PerplexitySearchClient, SearchClient, SearchResult};
pub use parley::server;
pub use parley::transcript;
pub use parley::transcript::{DebateEvent, Transcript};
