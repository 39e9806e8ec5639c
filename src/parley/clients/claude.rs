//! Anthropic Claude client wrapper built on the OpenAI-compatible transport.
//!
//! The wrapper delegates HTTP concerns to the shared OpenAI implementation, so
//! swapping a debate seat from OpenAI to Claude only requires a different
//! constructor.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{ClientWrapper, Message, ProviderError, TokenUsage};
use crate::parley::clients::openai::OpenAIClient;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Client wrapper for Anthropic's Claude API routed through the OpenAI
/// compatible surface.
pub struct ClaudeClient {
    /// Delegated client that handles the HTTP interactions.
    delegate_client: OpenAIClient,
    /// Exposed model name.
    model: String,
}

/// Anthropic Claude models used in debates.
pub enum Model {
    /// `claude-3-haiku-20240307` – fastest tier, the default debate participant.
    ClaudeHaiku3,
    /// `claude-haiku-4-5` – latest Haiku generation.
    ClaudeHaiku45,
    /// `claude-sonnet-4-5` – balanced reasoning + throughput.
    ClaudeSonnet45,
}

fn model_to_string(model: Model) -> String {
    match model {
        Model::ClaudeHaiku3 => "claude-3-haiku-20240307".to_string(),
        Model::ClaudeHaiku45 => "claude-haiku-4-5".to_string(),
        Model::ClaudeSonnet45 => "claude-sonnet-4-5".to_string(),
    }
}

impl ClaudeClient {
    /// Create a client from an API key and strongly typed model variant.
    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_str(secret_key, &model_to_string(model))
    }

    /// Create a client from an API key and explicit model string.
    pub fn new_with_model_str(secret_key: &str, model_name: &str) -> Self {
        ClaudeClient {
            // we reuse the OpenAIClient for Claude and delegate the calls to it
            delegate_client: OpenAIClient::new_with_base_url(
                secret_key,
                model_name,
                ANTHROPIC_BASE_URL,
            ),
            model: model_name.to_string(),
        }
    }
}

#[async_trait]
impl ClientWrapper for ClaudeClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn send_message(&self, messages: &[Message]) -> Result<Message, ProviderError> {
        self.delegate_client.send_message(messages).await
    }

    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        self.delegate_client.usage_slot()
    }
}
