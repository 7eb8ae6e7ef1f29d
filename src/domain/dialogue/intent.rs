//! Intents and slot values produced by the pattern matcher.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::leave::PendingLeaveRequest;

/// What the user is trying to do with one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AskQuestion,
    StartLeaveRequest,
    ProvideSlot,
    Confirm,
    Decline,
    CheckStatus,
    Unknown,
}

impl Intent {
    /// Returns true if the utterance goes to knowledge retrieval.
    pub fn is_knowledge_query(&self) -> bool {
        matches!(self, Intent::AskQuestion | Intent::Unknown)
    }
}

/// Slot values found in one utterance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedSlots {
    pub days: Option<u32>,
    pub start_date: Option<NaiveDate>,
    /// Explicit submit cue together with both slots: skip confirmation.
    pub implicit_submit: bool,
}

impl ExtractedSlots {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn start_date(date: Option<NaiveDate>) -> Self {
        Self {
            start_date: date,
            ..Self::default()
        }
    }
}

/// What the matcher needs to know about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext {
    pub has_pending: bool,
    pub pending_has_days: bool,
    pub pending_has_start_date: bool,
    /// Reference date for relative phrases such as "tomorrow".
    pub today: NaiveDate,
}

impl MatchContext {
    /// Context for a session with nothing pending.
    pub fn idle(today: NaiveDate) -> Self {
        Self {
            has_pending: false,
            pending_has_days: false,
            pending_has_start_date: false,
            today,
        }
    }

    /// Context derived from the session's pending request.
    pub fn for_pending(pending: Option<&PendingLeaveRequest>, today: NaiveDate) -> Self {
        match pending {
            Some(p) => Self {
                has_pending: true,
                pending_has_days: p.days.is_some(),
                pending_has_start_date: p.start_date.is_some(),
                today,
            },
            None => Self::idle(today),
        }
    }

    /// Pending request has days but still needs a start date.
    pub fn awaiting_start_date(&self) -> bool {
        self.has_pending && self.pending_has_days && !self.pending_has_start_date
    }
}
