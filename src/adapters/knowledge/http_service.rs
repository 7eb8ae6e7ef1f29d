//! Knowledge service backed by the retrieval/QA HTTP API.

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::adapters::ServiceEndpoint;
use crate::ports::{KnowledgeAnswer, KnowledgeError, KnowledgeQuery, KnowledgeService};

const QUERY_PATH: &str = "/api/chat/query";

/// HTTP implementation of [`KnowledgeService`].
pub struct HttpKnowledgeService {
    endpoint: ServiceEndpoint,
    client: Client,
}

impl HttpKnowledgeService {
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self, reqwest::Error> {
        let client = endpoint.client()?;
        Ok(Self { endpoint, client })
    }

    /// Parses the response status and maps failures.
    async fn handle_response_status(&self, response: Response) -> Result<Response, KnowledgeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            400 | 422 => Err(KnowledgeError::InvalidRequest(error_body)),
            500..=599 => Err(KnowledgeError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(KnowledgeError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl KnowledgeService for HttpKnowledgeService {
    async fn query(&self, query: KnowledgeQuery) -> Result<KnowledgeAnswer, KnowledgeError> {
        let response = self
            .client
            .post(self.endpoint.url(QUERY_PATH))
            .json(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    KnowledgeError::Timeout {
                        timeout_secs: self.endpoint.timeout_secs(),
                    }
                } else if e.is_connect() {
                    KnowledgeError::network(format!("Connection failed: {}", e))
                } else {
                    KnowledgeError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;
        response
            .json::<KnowledgeAnswer>()
            .await
            .map_err(|e| KnowledgeError::parse(e.to_string()))
    }
}
