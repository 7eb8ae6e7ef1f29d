//! UsageLogger port - Best-effort analytics for knowledge queries.
//!
//! Callers never wait on or react to the outcome of a log call; errors are
//! reported only so adapters can be tested.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::KnowledgeAnswer;
use crate::domain::foundation::Timestamp;

/// One logged knowledge query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub query: String,
    pub success: bool,
    pub tokens_used: u32,
    pub sources_count: u32,
    /// Wall time of the knowledge call.
    pub response_time_ms: u64,
    pub logged_at: Timestamp,
}

impl UsageEntry {
    /// Entry for a query the knowledge service answered.
    pub fn success(query: impl Into<String>, tokens_used: u32, sources_count: u32) -> Self {
        Self {
            query: query.into(),
            success: true,
            tokens_used,
            sources_count,
            response_time_ms: 0,
            logged_at: Timestamp::now(),
        }
    }

    /// Success entry built from the answer itself.
    pub fn answered(query: impl Into<String>, answer: &KnowledgeAnswer) -> Self {
        let sources_count = u32::try_from(answer.sources.len()).unwrap_or(u32::MAX);
        Self::success(query, answer.tokens_used, sources_count)
    }

    /// Entry for a query the knowledge service failed to answer.
    pub fn failure(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            success: false,
            tokens_used: 0,
            sources_count: 0,
            response_time_ms: 0,
            logged_at: Timestamp::now(),
        }
    }

    /// Sets the measured response time.
    pub fn with_response_time(mut self, elapsed: Duration) -> Self {
        self.response_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

/// Port for query usage logging.
#[async_trait]
pub trait UsageLogger: Send + Sync {
    /// Records one query.
    async fn log(&self, entry: UsageEntry) -> Result<(), UsageLogError>;
}

/// Usage logging errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UsageLogError {
    #[error("usage log unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_entry_has_zero_counts() {
        let entry = UsageEntry::failure("vpn setup");
        assert!(!entry.success);
        assert_eq!(entry.tokens_used, 0);
        assert_eq!(entry.sources_count, 0);
    }

    #[test]
    fn success_entry_keeps_counts() {
        let entry = UsageEntry::success("vpn setup", 42, 2);
        assert!(entry.success);
        assert_eq!(entry.tokens_used, 42);
        assert_eq!(entry.sources_count, 2);
    }

    #[test]
    fn answered_entry_counts_sources() {
        let answer = KnowledgeAnswer::new("Use the VPN client.")
            .with_source("FAQ:5")
            .with_source("it-handbook.pdf")
            .with_tokens_used(17);

        let entry = UsageEntry::answered("vpn setup", &answer);

        assert!(entry.success);
        assert_eq!(entry.sources_count, 2);
        assert_eq!(entry.tokens_used, 17);
    }

    #[test]
    fn response_time_saturates() {
        let entry = UsageEntry::failure("vpn").with_response_time(Duration::MAX);
        assert_eq!(entry.response_time_ms, u64::MAX);
    }

    #[test]
    fn response_time_in_millis() {
        let entry = UsageEntry::failure("vpn").with_response_time(Duration::from_millis(1250));
        assert_eq!(entry.response_time_ms, 1250);
    }
}
