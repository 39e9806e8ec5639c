//! Groq client wrapper, delegating to the OpenAI-compatible transport.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{ClientWrapper, Message, ProviderError, TokenUsage};
use crate::parley::clients::openai::OpenAIClient;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqClient {
    delegate_client: OpenAIClient,
    model: String,
}

/// Groq-hosted models used in debates.
pub enum Model {
    /// `llama-3.1-8b-instant` – the default debate participant.
    Llama318bInstant,
    /// `llama-3.3-70b-versatile` – larger, slower tier.
    Llama3370bVersatile,
}

fn model_to_string(model: Model) -> String {
    match model {
        Model::Llama318bInstant => "llama-3.1-8b-instant".to_string(),
        Model::Llama3370bVersatile => "llama-3.3-70b-versatile".to_string(),
    }
}

impl GroqClient {
    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_str(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_str(secret_key: &str, model_name: &str) -> Self {
        GroqClient {
            delegate_client: OpenAIClient::new_with_base_url(secret_key, model_name, GROQ_BASE_URL),
            model: model_name.to_string(),
        }
    }
}

#[async_trait]
impl ClientWrapper for GroqClient {
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
