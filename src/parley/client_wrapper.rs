use async_trait::async_trait;
use std::fmt;
use tokio::sync::Mutex;

use crate::parley::provider::Provider;

/// A ClientWrapper is a wrapper around a specific cloud LLM service.
/// It provides a common interface to interact with the LLMs.
/// It is stateless: the debate orchestrator reconstructs each turn's context
/// from the shared transcript, so a wrapper never retains conversation state.

/// Represents the possible roles for a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    System,
    // set by the developer to steer the model's responses
    User,
    // a message sent by a human user (or another debate participant)
    Assistant, // lets the model know the content was generated by itself
}

/// How many tokens were spent on prompt vs. completion.
#[derive(Clone, Debug)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// Represents a generic message to be sent to an LLM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The role associated with the message.
    pub role: Role,
    /// The actual content of the message.
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Error raised by a [`ClientWrapper`] when a generation attempt fails.
///
/// A turn-level failure is recovered by the orchestrator (the turn is skipped
/// and the debate continues); an arbiter failure aborts the session.
#[derive(Debug, Clone)]
pub enum ProviderError {
    /// The backend returned a completion with no text.
    EmptyResponse(String),
    /// The backend rejected the request or returned an API-level error.
    Api(String),
    /// The request never reached the backend or the connection dropped.
    Network(String),
    /// No client is registered for the requested provider identity.
    NotConfigured(Provider),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::EmptyResponse(model) => {
                write!(f, "empty response from LLM: {}", model)
            }
            ProviderError::Api(msg) => write!(f, "provider API error: {}", msg),
            ProviderError::Network(msg) => write!(f, "provider network error: {}", msg),
            ProviderError::NotConfigured(provider) => {
                write!(f, "no client configured for {}", provider.display_name())
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Trait defining the interface to interact with various LLM services.
///
/// All six debate backends implement this; the orchestrator routes to one via
/// the [`ProviderRegistry`](crate::parley::provider::ProviderRegistry) and
/// treats them uniformly.
#[async_trait]
pub trait ClientWrapper: Send + Sync {
    /// The model identifier this wrapper sends with each request.
    fn model_name(&self) -> &str;

    /// Send a message sequence to the LLM and get a single response back.
    async fn send_message(&self, messages: &[Message]) -> Result<Message, ProviderError>;

    /// Hook to retrieve usage from the *last* send_message() call.
    /// Default impl reads the usage slot, if the wrapper exposes one.
    async fn get_last_usage(&self) -> Option<TokenUsage> {
        match self.usage_slot() {
            Some(slot) => slot.lock().await.clone(),
            None => None,
        }
    }

    /// Wrappers that track token usage return their slot by overriding this.
    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        None
    }
}
