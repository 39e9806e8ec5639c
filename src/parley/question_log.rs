//! Fire-and-forget recording of incoming debate questions.
//!
//! Called once per session start. The core never learns whether recording
//! succeeded; a failing log endpoint must not slow down or abort a debate.

use async_trait::async_trait;
use serde_json::json;

use crate::parley::clients::http_pool::get_http_client;

/// Collaborator that records each debated question somewhere.
#[async_trait]
pub trait QuestionLog: Send + Sync {
    /// Record a question. Implementations swallow their own failures.
    async fn record(&self, question: &str);
}

/// Posts `{"question": ...}` to a configured endpoint, ignoring the outcome.
pub struct HttpQuestionLog {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuestionLog {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        HttpQuestionLog {
            client: get_http_client(&endpoint),
            endpoint,
        }
    }
}

#[async_trait]
impl QuestionLog for HttpQuestionLog {
    async fn record(&self, question: &str) {
        let result = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "question": question }))
            .send()
            .await;
        if let Err(e) = result {
            log::debug!("question log unreachable: {}", e);
        }
    }
}

/// Discards questions. Used when no log endpoint is configured.
pub struct NoopQuestionLog;

#[async_trait]
impl QuestionLog for NoopQuestionLog {
    async fn record(&self, _question: &str) {}
}
