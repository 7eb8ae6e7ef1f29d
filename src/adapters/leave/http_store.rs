//! Leave store backed by the transactions service.
//!
//! # Endpoints
//!
//! - `POST /api/transactions/leave` creates a request and returns its record
//! - `GET /api/transactions/leave/latest?email=` returns the newest record,
//!   or 404 when the employee has none

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::adapters::ServiceEndpoint;
use crate::domain::foundation::{EmployeeIdentity, Timestamp};
use crate::domain::leave::{LeaveRequestRecord, LeaveStatus, LeaveSubmission};
use crate::ports::{LeaveRequestStore, LeaveStoreError};

const SUBMIT_PATH: &str = "/api/transactions/leave";
const LATEST_PATH: &str = "/api/transactions/leave/latest";

/// HTTP implementation of [`LeaveRequestStore`].
pub struct HttpLeaveStore {
    endpoint: ServiceEndpoint,
    client: Client,
}

impl HttpLeaveStore {
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self, reqwest::Error> {
        let client = endpoint.client()?;
        Ok(Self { endpoint, client })
    }

    fn map_send_error(&self, e: reqwest::Error) -> LeaveStoreError {
        if e.is_timeout() {
            LeaveStoreError::Timeout {
                timeout_secs: self.endpoint.timeout_secs(),
            }
        } else if e.is_connect() {
            LeaveStoreError::network(format!("Connection failed: {}", e))
        } else {
            LeaveStoreError::network(e.to_string())
        }
    }

    async fn parse_record(response: Response) -> Result<LeaveRequestRecord, LeaveStoreError> {
        let body: RecordBody = response
            .json()
            .await
            .map_err(|e| LeaveStoreError::parse(e.to_string()))?;
        body.into_record()
    }
}

/// Maps a non-success status to a store error.
async fn status_error(response: Response) -> LeaveStoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_server_error() {
        LeaveStoreError::unavailable(format!("Server error {}: {}", status, body))
    } else {
        LeaveStoreError::Refused {
            status: status.as_u16(),
            message: body,
        }
    }
}

#[async_trait]
impl LeaveRequestStore for HttpLeaveStore {
    async fn submit(
        &self,
        submission: &LeaveSubmission,
    ) -> Result<LeaveRequestRecord, LeaveStoreError> {
        let body = SubmitBody {
            email: submission.identity.as_str(),
            days: submission.days,
            reason: &submission.reason,
            start_date: submission.start_date.format("%Y-%m-%d").to_string(),
        };

        let response = self
            .client
            .post(self.endpoint.url(SUBMIT_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Self::parse_record(response).await
    }

    async fn latest(
        &self,
        identity: &EmployeeIdentity,
    ) -> Result<Option<LeaveRequestRecord>, LeaveStoreError> {
        let response = self
            .client
            .get(self.endpoint.url(LATEST_PATH))
            .query(&[("email", identity.as_str())])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Self::parse_record(response).await.map(Some),
            _ => Err(status_error(response).await),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    email: &'a str,
    days: u32,
    reason: &'a str,
    start_date: String,
}

#[derive(Debug, Deserialize)]
struct RecordBody {
    id: String,
    days: u32,
    #[serde(default)]
    reason: Option<String>,
    status: String,
    request_date: String,
    remaining_days: u32,
    #[serde(default)]
    start_date: Option<String>,
}

impl RecordBody {
    fn into_record(self) -> Result<LeaveRequestRecord, LeaveStoreError> {
        let status = match self.status.to_ascii_lowercase().as_str() {
            "approved" => LeaveStatus::Approved,
            "rejected" => LeaveStatus::Rejected,
            other => {
                return Err(LeaveStoreError::parse(format!(
                    "unknown leave status '{}'",
                    other
                )))
            }
        };

        Ok(LeaveRequestRecord {
            id: self.id,
            days: self.days,
            reason: self.reason,
            status,
            request_date: parse_request_date(&self.request_date)?,
            remaining_days: self.remaining_days,
            start_date: self
                .start_date
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        })
    }
}

/// Accepts RFC 3339 or a naive ISO datetime, the latter taken as UTC.
fn parse_request_date(raw: &str) -> Result<Timestamp, LeaveStoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Timestamp::from_datetime(naive.and_utc()))
        .map_err(|e| LeaveStoreError::parse(format!("invalid request_date '{}': {}", raw, e)))
}
