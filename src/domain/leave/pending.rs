//! The in-flight leave request of a session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A slot a leave request needs before it can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveSlot {
    Days,
    StartDate,
}

impl fmt::Display for LeaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveSlot::Days => write!(f, "days"),
            LeaveSlot::StartDate => write!(f, "start_date"),
        }
    }
}

/// A leave request being assembled over several turns.
///
/// Both slots stay optional until the user supplies them; `reason` is the
/// raw text of the utterance that started the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLeaveRequest {
    pub days: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub reason: String,
}

/// Partial update applied to a pending request. `None` leaves a slot as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingUpdate {
    pub days: Option<u32>,
    pub start_date: Option<NaiveDate>,
}

impl PendingUpdate {
    /// Update that only fills the start date.
    pub fn start_date(date: NaiveDate) -> Self {
        Self {
            days: None,
            start_date: Some(date),
        }
    }
}

impl PendingLeaveRequest {
    /// Creates a pending request from the triggering utterance.
    pub fn new(days: Option<u32>, start_date: Option<NaiveDate>, reason: impl Into<String>) -> Self {
        Self {
            days,
            start_date,
            reason: reason.into(),
        }
    }

    /// Applies a partial update.
    pub fn apply(&mut self, update: PendingUpdate) {
        if let Some(days) = update.days {
            self.days = Some(days);
        }
        if let Some(date) = update.start_date {
            self.start_date = Some(date);
        }
    }

    /// Returns true if days are known but the start date is not.
    pub fn awaiting_start_date(&self) -> bool {
        self.days.is_some() && self.start_date.is_none()
    }

    /// The first slot still missing, days before start date.
    pub fn missing_slot(&self) -> Option<LeaveSlot> {
        if self.days.is_none() {
            Some(LeaveSlot::Days)
        } else if self.start_date.is_none() {
            Some(LeaveSlot::StartDate)
        } else {
            None
        }
    }

    /// Returns true once both slots are filled.
    pub fn is_complete(&self) -> bool {
        self.missing_slot().is_none()
    }
}
