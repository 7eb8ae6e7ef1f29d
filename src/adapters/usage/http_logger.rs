//! Usage logger posting to the analytics service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::adapters::ServiceEndpoint;
use crate::ports::{UsageEntry, UsageLogError, UsageLogger};

const LOG_QUERY_PATH: &str = "/api/analytics/log-query";

/// HTTP implementation of [`UsageLogger`]. The response body is ignored.
pub struct HttpUsageLogger {
    endpoint: ServiceEndpoint,
    client: Client,
}

impl HttpUsageLogger {
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self, reqwest::Error> {
        let client = endpoint.client()?;
        Ok(Self { endpoint, client })
    }
}

#[derive(Debug, Serialize)]
struct LogQueryBody<'a> {
    query: &'a str,
    success: bool,
    tokens_used: u32,
    sources_count: u32,
    /// Seconds, as the analytics service expects.
    response_time: f64,
}

impl<'a> From<&'a UsageEntry> for LogQueryBody<'a> {
    fn from(entry: &'a UsageEntry) -> Self {
        Self {
            query: &entry.query,
            success: entry.success,
            tokens_used: entry.tokens_used,
            sources_count: entry.sources_count,
            response_time: entry.response_time_ms as f64 / 1000.0,
        }
    }
}

#[async_trait]
impl UsageLogger for HttpUsageLogger {
    async fn log(&self, entry: UsageEntry) -> Result<(), UsageLogError> {
        let response = self
            .client
            .post(self.endpoint.url(LOG_QUERY_PATH))
            .json(&LogQueryBody::from(&entry))
            .send()
            .await
            .map_err(|e| UsageLogError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UsageLogError::Unavailable(format!(
                "analytics returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
