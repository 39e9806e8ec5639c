//! Configuration for the parley server.
//!
//! Everything comes from the environment, one variable per collaborator
//! credential. A missing provider key simply leaves that backend out of the
//! registry; a missing search key downgrades debates to tool-less turns.

use std::env;
use std::net::SocketAddr;

use crate::parley::orchestrator::DisconnectPolicy;

/// Environment-driven settings for the server binary.
///
/// # Example
///
/// ```rust,no_run
/// use parley::config::ParleyConfig;
///
/// std::env::set_var("OPENAI_API_KEY", "sk-...");
/// let config = ParleyConfig::from_env();
/// assert!(config.openai_api_key.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ParleyConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub xai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
    pub perplexity_api_key: Option<String>,
    /// Optional endpoint the question log posts to.
    pub question_log_endpoint: Option<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// What a session does when its stream consumer disconnects.
    pub disconnect_policy: DisconnectPolicy,
    /// Emit `ProviderTurnFailed` events instead of dropping failed turns
    /// silently.
    pub surface_turn_failures: bool,
}

impl ParleyConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        ParleyConfig {
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            xai_api_key: env::var("XAI_API_KEY").ok(),
            google_api_key: env::var("GOOGLEAI_API_KEY").ok(),
            groq_api_key: env::var("GROQ_API_KEY").ok(),
            deepseek_api_key: env::var("DEEPSEEK_API_KEY").ok(),
            perplexity_api_key: env::var("PERPLEXITY_API_KEY").ok(),
            question_log_endpoint: env::var("QUESTION_LOG_ENDPOINT").ok(),
            bind_addr: env::var("PARLEY_BIND_ADDR")
                .ok()
                .and_then(|addr| addr.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
            disconnect_policy: match env::var("PARLEY_STOP_ON_DISCONNECT").ok().as_deref() {
                Some("1") | Some("true") => DisconnectPolicy::StopWhenDisconnected,
                _ => DisconnectPolicy::RunToCompletion,
            },
            surface_turn_failures: matches!(
                env::var("PARLEY_SURFACE_TURN_FAILURES").ok().as_deref(),
                Some("1") | Some("true")
            ),
        }
    }
}

impl Default for ParleyConfig {
    fn default() -> Self {
        ParleyConfig {
            openai_api_key: None,
            anthropic_api_key: None,
            xai_api_key: None,
            google_api_key: None,
            groq_api_key: None,
            deepseek_api_key: None,
            perplexity_api_key: None,
            question_log_endpoint: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            disconnect_policy: DisconnectPolicy::RunToCompletion,
            surface_turn_failures: false,
        }
    }
}
