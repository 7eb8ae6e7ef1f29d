//! Submitted and stored leave requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{EmployeeIdentity, Timestamp, ValidationError};

/// Outcome decided by the leave store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Approved,
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A complete, validated leave request ready for the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveSubmission {
    pub identity: EmployeeIdentity,
    pub days: u32,
    pub reason: String,
    pub start_date: NaiveDate,
}

impl LeaveSubmission {
    /// Creates a submission, rejecting a zero day count.
    pub fn new(
        identity: EmployeeIdentity,
        days: u32,
        reason: impl Into<String>,
        start_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::not_positive("days", 0));
        }
        Ok(Self {
            identity,
            days,
            reason: reason.into(),
            start_date,
        })
    }
}

/// Durable record returned by the store. Read-only to the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestRecord {
    pub id: String,
    pub days: u32,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub request_date: Timestamp,
    pub remaining_days: u32,
    pub start_date: Option<NaiveDate>,
}
