//! Google Gemini client wrapper.
//!
//! Gemini's OpenAI-compatible endpoint lives under `/v1beta`, so this wrapper
//! delegates with an explicit chat path instead of the default
//! `/v1/chat/completions`.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{ClientWrapper, Message, ProviderError, TokenUsage};
use crate::parley::clients::openai::OpenAIClient;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const GEMINI_CHAT_PATH: &str = "/v1beta/chat/completions";

pub struct GeminiClient {
    delegate_client: OpenAIClient,
    pub model: String,
}

/// Google Gemini models used in debates.
pub enum Model {
    /// `gemini-2.5-flash-lite` – the default debate participant.
    Gemini25FlashLite,
    /// `gemini-2.5-flash` – higher quality flash tier.
    Gemini25Flash,
    /// `gemini-2.5-pro` – full capability tier.
    Gemini25Pro,
}

fn model_to_string(model: Model) -> String {
    match model {
        Model::Gemini25FlashLite => "gemini-2.5-flash-lite".to_string(),
        Model::Gemini25Flash => "gemini-2.5-flash".to_string(),
        Model::Gemini25Pro => "gemini-2.5-pro".to_string(),
    }
}

impl GeminiClient {
    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_string(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_string(secret_key: &str, model_name: &str) -> Self {
        GeminiClient {
            delegate_client: OpenAIClient::new_with_base_url_and_path(
                secret_key,
                model_name,
                GEMINI_BASE_URL,
                GEMINI_CHAT_PATH,
            ),
            model: model_name.to_string(),
        }
    }
}

#[async_trait]
impl ClientWrapper for GeminiClient {
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
