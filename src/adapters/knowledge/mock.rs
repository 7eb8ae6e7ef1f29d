//! Mock knowledge service for testing.
//!
//! Returns queued answers or errors in order, then a fallback outcome once
//! the queue is empty. Every query is recorded for verification.
//!
//! ```ignore
//! let service = MockKnowledgeService::new()
//!     .with_answer(KnowledgeAnswer::new("15 days per year").with_source("FAQ:1"));
//!
//! let answer = service.query(KnowledgeQuery::new("vacation?", 5)).await?;
//! assert_eq!(service.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{KnowledgeAnswer, KnowledgeError, KnowledgeQuery, KnowledgeService};

type Outcome = Result<KnowledgeAnswer, KnowledgeError>;

/// Scripted [`KnowledgeService`].
#[derive(Debug, Clone)]
pub struct MockKnowledgeService {
    /// Queued outcomes, consumed in order.
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    /// Returned once the queue is empty.
    fallback: Outcome,
    /// Simulated latency per query.
    delay: Duration,
    calls: Arc<Mutex<Vec<KnowledgeQuery>>>,
}

impl Default for MockKnowledgeService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockKnowledgeService {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Ok(KnowledgeAnswer::new("Mock answer")),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Service that fails every query with `Unavailable`.
    pub fn unavailable() -> Self {
        Self::new().with_fallback(Err(KnowledgeError::unavailable("knowledge service is down")))
    }

    /// Queues a successful answer.
    pub fn with_answer(self, answer: KnowledgeAnswer) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(answer));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: KnowledgeError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets the outcome returned once the queue is drained.
    pub fn with_fallback(mut self, outcome: Outcome) -> Self {
        self.fallback = outcome;
        self
    }

    /// Sets simulated latency per query.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded queries.
    pub fn get_calls(&self) -> Vec<KnowledgeQuery> {
        self.calls.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> Outcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl KnowledgeService for MockKnowledgeService {
    async fn query(&self, query: KnowledgeQuery) -> Result<KnowledgeAnswer, KnowledgeError> {
        self.calls.lock().unwrap().push(query);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_outcome()
    }
}
