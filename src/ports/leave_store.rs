//! Leave Request Store Port - Interface for the transactional leave backend.
//!
//! The store owns approval decisions and remaining balances; the dialogue
//! only submits complete requests and reads back the resulting records.
//!
//! # Failure semantics
//!
//! "No request on record" is a normal outcome (`Ok(None)` from
//! [`LeaveRequestStore::latest`]), never an error. Every `LeaveStoreError`
//! is a transport-level failure the caller may recover from.

use async_trait::async_trait;

use crate::domain::foundation::EmployeeIdentity;
use crate::domain::leave::{LeaveRequestRecord, LeaveSubmission};

/// Port for the leave request transaction store.
#[async_trait]
pub trait LeaveRequestStore: Send + Sync {
    /// Creates a leave request and returns the store's decision.
    async fn submit(
        &self,
        submission: &LeaveSubmission,
    ) -> Result<LeaveRequestRecord, LeaveStoreError>;

    /// Returns the most recent request of an employee, if any.
    async fn latest(
        &self,
        identity: &EmployeeIdentity,
    ) -> Result<Option<LeaveRequestRecord>, LeaveStoreError>;
}

/// Leave store errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LeaveStoreError {
    /// Store is unreachable or reported a server error.
    #[error("leave store unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Store answered with a non-success status.
    #[error("leave store refused request ({status}): {message}")]
    Refused {
        /// HTTP-like status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the store's response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl LeaveStoreError {
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
            LeaveStoreError::Unavailable { .. }
                | LeaveStoreError::Network(_)
                | LeaveStoreError::Timeout { .. }
        )
    }
}
