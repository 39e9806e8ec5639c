//! xAI Grok client wrapper, delegating to the OpenAI-compatible transport.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{ClientWrapper, Message, ProviderError, TokenUsage};
use crate::parley::clients::openai::OpenAIClient;

const XAI_BASE_URL: &str = "https://api.x.ai/v1";

pub struct GrokClient {
    delegate_client: OpenAIClient,
    model: String,
}

/// xAI models used in debates.
pub enum Model {
    /// `grok-3-mini-beta` – the default debate participant.
    Grok3MiniBeta,
    /// `grok-3-mini-fast-beta` – lower latency mini tier.
    Grok3MiniFastBeta,
    /// `grok-3-beta` – full capability tier.
    Grok3Beta,
}

fn model_to_string(model: Model) -> String {
    match model {
        Model::Grok3MiniBeta => "grok-3-mini-beta".to_string(),
        Model::Grok3MiniFastBeta => "grok-3-mini-fast-beta".to_string(),
        Model::Grok3Beta => "grok-3-beta".to_string(),
    }
}

impl GrokClient {
    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_str(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_str(secret_key: &str, model_name: &str) -> Self {
        GrokClient {
            delegate_client: OpenAIClient::new_with_base_url(secret_key, model_name, XAI_BASE_URL),
            model: model_name.to_string(),
        }
    }
}

#[async_trait]
impl ClientWrapper for GrokClient {
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
