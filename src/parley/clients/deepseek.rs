//! DeepSeek client wrapper, delegating to the OpenAI-compatible transport.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{ClientWrapper, Message, ProviderError, TokenUsage};
use crate::parley::clients::openai::OpenAIClient;

const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";

pub struct DeepSeekClient {
    delegate_client: OpenAIClient,
    model: String,
}

/// DeepSeek models used in debates.
pub enum Model {
    /// `deepseek-chat` – the default debate participant.
    DeepSeekChat,
    /// `deepseek-reasoner` – reasoning tier.
    DeepSeekReasoner,
}

fn model_to_string(model: Model) -> String {
    match model {
        Model::DeepSeekChat => "deepseek-chat".to_string(),
        Model::DeepSeekReasoner => "deepseek-reasoner".to_string(),
    }
}

impl DeepSeekClient {
    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_str(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_str(secret_key: &str, model_name: &str) -> Self {
        DeepSeekClient {
            delegate_client: OpenAIClient::new_with_base_url(
                secret_key,
                model_name,
                DEEPSEEK_BASE_URL,
            ),
            model: model_name.to_string(),
        }
    }
}

#[async_trait]
impl ClientWrapper for DeepSeekClient {
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
