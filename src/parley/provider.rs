//! Provider identities and the registry that maps each identity to a live
//! [`ClientWrapper`].
//!
//! A [`Provider`] is both a routing key (into the [`ProviderRegistry`] lookup
//! table) and a display label (in transcripts and streamed events). Backends
//! are interchangeable: the orchestrator never knows which concrete wrapper
//! sits behind an identity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::parley::client_wrapper::{ClientWrapper, ProviderError};
use crate::parley::clients::claude::ClaudeClient;
use crate::parley::clients::deepseek::DeepSeekClient;
use crate::parley::clients::gemini::GeminiClient;
use crate::parley::clients::grok::GrokClient;
use crate::parley::clients::groq::GroqClient;
use crate::parley::clients::openai::OpenAIClient;
use crate::parley::config::ParleyConfig;

/// Enumerated identity of a debate backend.
///
/// Immutable for the lifetime of a session; used as both a routing key and a
/// display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "OpenAI")]
    OpenAi,
    Anthropic,
    #[serde(rename = "xAI")]
    XAi,
    Google,
    Groq,
    DeepSeek,
}

impl Provider {
    /// Label shown to other debate participants and streamed to clients.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::XAi => "xAI",
            Provider::Google => "Google",
            Provider::Groq => "Groq",
            Provider::DeepSeek => "DeepSeek",
        }
    }

    /// All six identities, in a stable order.
    pub fn all() -> [Provider; 6] {
        [
            Provider::OpenAi,
            Provider::Anthropic,
            Provider::XAi,
            Provider::Google,
            Provider::Groq,
            Provider::DeepSeek,
        ]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lookup table mapping each [`Provider`] identity to its client.
///
/// Built once at startup from [`ParleyConfig`]; a backend is only registered
/// when its API key is configured. Sessions share the registry through an
/// `Arc` and clients are safe to call concurrently across sessions.
pub struct ProviderRegistry {
    clients: HashMap<Provider, Arc<dyn ClientWrapper>>,
}

impl ProviderRegistry {
    /// Create an empty registry. Mostly useful together with
    /// [`with_client`](ProviderRegistry::with_client) in tests.
    pub fn empty() -> Self {
        ProviderRegistry {
            clients: HashMap::new(),
        }
    }

    /// Build the registry from configured API keys, one wrapper per backend.
    ///
    /// The default model for each identity mirrors what the debate was tuned
    /// against; override with [`with_client`](ProviderRegistry::with_client)
    /// if a different model is needed.
    pub fn from_config(config: &ParleyConfig) -> Self {
        let mut registry = ProviderRegistry::empty();
        if let Some(key) = &config.openai_api_key {
            registry.insert(
                Provider::OpenAi,
                Arc::new(OpenAIClient::new_with_model_string(key, "gpt-5-mini")),
            );
        }
        if let Some(key) = &config.anthropic_api_key {
            registry.insert(
                Provider::Anthropic,
                Arc::new(ClaudeClient::new_with_model_str(
                    key,
                    "claude-3-haiku-20240307",
                )),
            );
        }
        if let Some(key) = &config.xai_api_key {
            registry.insert(
                Provider::XAi,
                Arc::new(GrokClient::new_with_model_str(key, "grok-3-mini-beta")),
            );
        }
        if let Some(key) = &config.google_api_key {
            registry.insert(
                Provider::Google,
                Arc::new(GeminiClient::new_with_model_string(
                    key,
                    "gemini-2.5-flash-lite",
                )),
            );
        }
        if let Some(key) = &config.groq_api_key {
            registry.insert(
                Provider::Groq,
                Arc::new(GroqClient::new_with_model_str(key, "llama-3.1-8b-instant")),
            );
        }
        if let Some(key) = &config.deepseek_api_key {
            registry.insert(
                Provider::DeepSeek,
                Arc::new(DeepSeekClient::new_with_model_str(key, "deepseek-chat")),
            );
        }
        registry
    }

    /// Register (or replace) the client for an identity. Builder-style so test
    /// stubs can be injected.
    pub fn with_client(mut self, provider: Provider, client: Arc<dyn ClientWrapper>) -> Self {
        self.insert(provider, client);
        self
    }

    fn insert(&mut self, provider: Provider, client: Arc<dyn ClientWrapper>) {
        self.clients.insert(provider, client);
    }

    /// Resolve an identity to its client.
    pub fn client(&self, provider: Provider) -> Result<Arc<dyn ClientWrapper>, ProviderError> {
        self.clients
            .get(&provider)
            .cloned()
            .ok_or(ProviderError::NotConfigured(provider))
    }

    /// Identities with a registered client, in [`Provider::all`] order.
    pub fn configured(&self) -> Vec<Provider> {
        Provider::all()
            .iter()
            .copied()
            .filter(|p| self.clients.contains_key(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_stable() {
        assert_eq!(Provider::OpenAi.display_name(), "OpenAI");
        assert_eq!(Provider::XAi.display_name(), "xAI");
        assert_eq!(Provider::DeepSeek.display_name(), "DeepSeek");
    }

    #[test]
    fn provider_serde_round_trip() {
        for provider in Provider::all() {
            let json = serde_json::to_string(&provider).unwrap();
            let back: Provider = serde_json::from_str(&json).unwrap();
            assert_eq!(provider, back);
        }
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"OpenAI\"");
    }

    #[test]
    fn empty_registry_reports_not_configured() {
        let registry = ProviderRegistry::empty();
        assert!(registry.client(Provider::Groq).is_err());
        assert!(registry.configured().is_empty());
    }
}
