//! The web-search capability agents may invoke mid-turn.
//!
//! Search is best-effort by contract: a failed or empty search returns an
//! empty result list and the agent's turn proceeds without web content. The
//! orchestrator never sees a search error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::parley::clients::http_pool::get_http_client;

const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
const MAX_RESULTS: usize = 10;
const MAX_TOKENS_PER_PAGE: usize = 2048;

/// One ranked search hit handed back to the requesting agent and echoed into
/// the transcript's `ToolInvocation` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub content: String,
}

/// Capability interface for web search.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run a query. Returns an empty list on any failure.
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}

#[derive(Serialize)]
struct PerplexitySearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    max_tokens_per_page: usize,
}

#[derive(Deserialize)]
struct PerplexitySearchResponse {
    #[serde(default)]
    results: Vec<PerplexitySearchHit>,
}

#[derive(Deserialize)]
struct PerplexitySearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    snippet: String,
    // The API may return extracted page text under either name.
    #[serde(default, alias = "text")]
    content: String,
}

/// [`SearchClient`] backed by the Perplexity Search API.
pub struct PerplexitySearchClient {
    client: reqwest::Client,
    api_key: String,
}

impl PerplexitySearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        PerplexitySearchClient {
            client: get_http_client(PERPLEXITY_BASE_URL),
            api_key: api_key.into(),
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, reqwest::Error> {
        let body = PerplexitySearchRequest {
            query,
            max_results: MAX_RESULTS,
            max_tokens_per_page: MAX_TOKENS_PER_PAGE,
        };

        let response: PerplexitySearchResponse = self
            .client
            .post(format!("{}/search", PERPLEXITY_BASE_URL))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .results
            .into_iter()
            .map(|hit| SearchResult {
                title: hit.title,
                link: hit.url,
                snippet: hit.snippet,
                content: hit.content,
            })
            .collect())
    }
}

#[async_trait]
impl SearchClient for PerplexitySearchClient {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        log::info!("searching for: {}", query);
        match self.try_search(query).await {
            Ok(results) => results,
            Err(e) => {
                log::error!("search failed for {:?}: {}", query, e);
                Vec::new()
            }
        }
    }
}

/// [`SearchClient`] that always comes back empty. Used when no search API key
/// is configured; debates still run, just without web grounding.
pub struct NoopSearchClient;

#[async_trait]
impl SearchClient for NoopSearchClient {
    async fn search(&self, _query: &str) -> Vec<SearchResult> {
        Vec::new()
    }
}
