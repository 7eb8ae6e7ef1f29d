//! Bounded in-memory usage log.
//!
//! Keeps the most recent entries only; older ones are dropped as new ones
//! arrive.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{UsageEntry, UsageLogError, UsageLogger};

/// Entries retained by default.
pub const DEFAULT_USAGE_LOG_CAPACITY: usize = 1000;

/// Aggregates over the retained entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageSummary {
    pub total_queries: usize,
    pub successful_queries: usize,
    pub total_tokens: u64,
}

/// In-memory implementation of [`UsageLogger`].
#[derive(Debug, Clone)]
pub struct InMemoryUsageLog {
    entries: Arc<RwLock<VecDeque<UsageEntry>>>,
    capacity: usize,
    available: Arc<AtomicBool>,
}

impl InMemoryUsageLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_USAGE_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggles simulated availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Retained entries, oldest first.
    pub async fn entries(&self) -> Vec<UsageEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn summary(&self) -> UsageSummary {
        let entries = self.entries.read().await;
        UsageSummary {
            total_queries: entries.len(),
            successful_queries: entries.iter().filter(|e| e.success).count(),
            total_tokens: entries.iter().map(|e| u64::from(e.tokens_used)).sum(),
        }
    }
}

impl Default for InMemoryUsageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageLogger for InMemoryUsageLog {
    async fn log(&self, entry: UsageEntry) -> Result<(), UsageLogError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(UsageLogError::Unavailable("usage log is offline".to_string()));
        }

        let mut entries = self.entries.write().await;
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        Ok(())
    }
}
