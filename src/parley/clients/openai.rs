//! The `OpenAIClient` implements [`ClientWrapper`] for OpenAI's Chat
//! Completions API, capturing both the assistant response and token usage.
//!
//! Because every other backend in the debate roster (Anthropic, xAI, Google,
//! Groq, DeepSeek) exposes an OpenAI-compatible chat surface, their wrappers
//! delegate to this client with a different base URL — see the sibling
//! modules in [`crate::parley::clients`].

use async_trait::async_trait;
use openai_rust2 as openai_rust;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{ClientWrapper, Message, ProviderError, Role, TokenUsage};
use crate::parley::clients::common::{format_messages, send_and_track};
use crate::parley::clients::http_pool::get_http_client;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_CHAT_PATH: &str = "/v1/chat/completions";

/// Official model identifiers this backend is run with.
pub enum Model {
    /// `gpt-5-mini` – fast GPT-5 variant, the default debate participant.
    GPT5Mini,
    /// `gpt-5` – high reasoning, higher latency.
    GPT5,
    /// `gpt-4.1-nano` – ultra low cost tier.
    GPT41Nano,
    /// `gpt-4o-mini` – cost effective GPT-4o derivative.
    GPT4oMini,
}

/// Convert a [`Model`] variant into the string identifier expected by the REST API.
pub fn model_to_string(model: Model) -> String {
    match model {
        Model::GPT5Mini => "gpt-5-mini".to_string(),
        Model::GPT5 => "gpt-5".to_string(),
        Model::GPT41Nano => "gpt-4.1-nano".to_string(),
        Model::GPT4oMini => "gpt-4o-mini".to_string(),
    }
}

/// Client wrapper for OpenAI's Chat Completions API (and any compatible
/// endpoint reached through [`OpenAIClient::new_with_base_url`]).
pub struct OpenAIClient {
    /// Underlying SDK client pointing at the REST endpoint.
    client: openai_rust::Client,
    /// Model name injected into each request.
    model: String,
    /// Request path appended to the base URL.
    url_path: String,
    /// Storage for the token usage returned by the most recent request.
    token_usage: Mutex<Option<TokenUsage>>,
}

impl OpenAIClient {
    /// Construct a new client using the provided API key and [`Model`] variant.
    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_string(secret_key, &model_to_string(model))
    }

    /// Construct a new client using the provided API key and explicit model
    /// name. The most general constructor for OpenAI itself.
    pub fn new_with_model_string(secret_key: &str, model_name: &str) -> Self {
        OpenAIClient {
            client: openai_rust::Client::new_with_client(
                secret_key,
                get_http_client(OPENAI_BASE_URL),
            ),
            model: model_name.to_string(),
            url_path: DEFAULT_CHAT_PATH.to_string(),
            token_usage: Mutex::new(None),
        }
    }

    /// Construct a client targeting a custom OpenAI-compatible base URL.
    pub fn new_with_base_url(secret_key: &str, model_name: &str, base_url: &str) -> Self {
        Self::new_with_base_url_and_path(secret_key, model_name, base_url, DEFAULT_CHAT_PATH)
    }

    /// Like [`OpenAIClient::new_with_base_url`] but with an explicit chat
    /// path, for backends that deviate from `/v1/chat/completions`.
    pub fn new_with_base_url_and_path(
        secret_key: &str,
        model_name: &str,
        base_url: &str,
        url_path: &str,
    ) -> Self {
        OpenAIClient {
            client: openai_rust::Client::new_with_client_and_base_url(
                secret_key,
                get_http_client(base_url),
                base_url,
            ),
            model: model_name.to_string(),
            url_path: url_path.to_string(),
            token_usage: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ClientWrapper for OpenAIClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn send_message(&self, messages: &[Message]) -> Result<Message, ProviderError> {
        let formatted_messages = format_messages(messages);

        let content = send_and_track(
            &self.client,
            &self.model,
            formatted_messages,
            Some(self.url_path.clone()),
            &self.token_usage,
        )
        .await?;

        Ok(Message {
            role: Role::Assistant,
            content,
        })
    }

    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        Some(&self.token_usage)
    }
}
