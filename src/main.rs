//! `parley-server`: HTTP frontend for multi-agent LLM debates.
//!
//! All wiring comes from the environment; see [`ParleyConfig::from_env`].

use std::sync::Arc;

use parley::question_log::{HttpQuestionLog, NoopQuestionLog, QuestionLog};
use parley::search::{NoopSearchClient, PerplexitySearchClient, SearchClient};
use parley::{DebateOrchestrator, ParleyConfig, ProviderRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    parley::init_logger();

    let config = ParleyConfig::from_env();
    let registry = Arc::new(ProviderRegistry::from_config(&config));
    log::info!("configured providers: {:?}", registry.configured());

    let search: Arc<dyn SearchClient> = match &config.perplexity_api_key {
        Some(key) => Arc::new(PerplexitySearchClient::new(key)),
        None => {
            log::warn!("PERPLEXITY_API_KEY not set; debates run without web search");
            Arc::new(NoopSearchClient)
        }
    };

    let question_log: Arc<dyn QuestionLog> = match &config.question_log_endpoint {
        Some(endpoint) => Arc::new(HttpQuestionLog::new(endpoint)),
        None => Arc::new(NoopQuestionLog),
    };

    let orchestrator = Arc::new(
        DebateOrchestrator::new(registry, search)
            .with_question_log(question_log)
            .with_disconnect_policy(config.disconnect_policy)
            .with_surface_turn_failures(config.surface_turn_failures),
    );

    let app = parley::server::router(orchestrator);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("parley-server listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
