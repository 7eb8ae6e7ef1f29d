//! Knowledge Service Port - Interface for the retrieval/question-answering backend.
//!
//! The service is opaque to the dialogue: it receives the raw utterance and
//! returns an answer with the identifiers of the sources it drew on. Any
//! failure makes the dialogue fall back to its local canned answers.
//!
//! # Example
//!
//! ```ignore
//! let answer = service
//!     .query(KnowledgeQuery::new("What is the travel policy?", 5))
//!     .await?;
//! println!("{} ({} sources)", answer.answer, answer.sources.len());
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for knowledge retrieval.
#[async_trait]
pub trait KnowledgeService: Send + Sync {
    /// Answers a free-text question.
    async fn query(&self, query: KnowledgeQuery) -> Result<KnowledgeAnswer, KnowledgeError>;
}

/// Request for the knowledge service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeQuery {
    /// The question, verbatim.
    pub query: String,
    /// Upper bound on retrieved context items.
    pub max_results: u32,
}

impl KnowledgeQuery {
    /// Creates a new query.
    pub fn new(query: impl Into<String>, max_results: u32) -> Self {
        Self {
            query: query.into(),
            max_results,
        }
    }
}

/// Answer from the knowledge service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeAnswer {
    /// Generated answer text.
    pub answer: String,
    /// Source identifiers, in relevance order. May be empty.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Tokens consumed producing the answer.
    #[serde(default)]
    pub tokens_used: u32,
}

impl KnowledgeAnswer {
    /// Creates an answer without sources.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
            tokens_used: 0,
        }
    }

    /// Adds a source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Sets the token usage.
    pub fn with_tokens_used(mut self, tokens: u32) -> Self {
        self.tokens_used = tokens;
        self
    }
}

/// Knowledge service errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum KnowledgeError {
    /// Service is unavailable (e.g. not configured upstream, 5xx).
    #[error("knowledge service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Request was rejected as invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl KnowledgeError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            KnowledgeError::Unavailable { .. }
                | KnowledgeError::Network(_)
                | KnowledgeError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_builder_works() {
        let answer = KnowledgeAnswer::new("Economy class only.")
            .with_source("travel.pdf")
            .with_source("FAQ:3")
            .with_tokens_used(120);

        assert_eq!(answer.answer, "Economy class only.");
        assert_eq!(answer.sources, vec!["travel.pdf", "FAQ:3"]);
        assert_eq!(answer.tokens_used, 120);
    }

    #[test]
    fn answer_deserializes_without_optional_fields() {
        let answer: KnowledgeAnswer =
            serde_json::from_str(r#"{"answer":"Hello","context_count":0}"#).unwrap();
        assert_eq!(answer.answer, "Hello");
        assert!(answer.sources.is_empty());
        assert_eq!(answer.tokens_used, 0);
    }

    #[test]
    fn query_serializes_fields() {
        let json = serde_json::to_value(KnowledgeQuery::new("vpn?", 5)).unwrap();
        assert_eq!(json["query"], "vpn?");
        assert_eq!(json["max_results"], 5);
    }

    #[test]
    fn retryable_classification() {
        assert!(KnowledgeError::unavailable("down").is_retryable());
        assert!(KnowledgeError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(!KnowledgeError::parse("garbage").is_retryable());
        assert!(!KnowledgeError::InvalidRequest("empty".into()).is_retryable());
    }
}
