//! Per-session dialogue state: at most one pending leave request.

use serde::{Deserialize, Serialize};

use crate::domain::leave::{PendingLeaveRequest, PendingUpdate};

/// Where the session stands with respect to its pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    Idle,
    AwaitingDays,
    AwaitingStartDate,
    AwaitingConfirmation,
}

/// Container for the session's single pending request.
///
/// Holds no validation logic; the dialogue manager decides when to set,
/// update or clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueState {
    pending: Option<PendingLeaveRequest>,
}

impl DialogueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending request, returning the one it displaced.
    pub fn set_pending(&mut self, request: PendingLeaveRequest) -> Option<PendingLeaveRequest> {
        self.pending.replace(request)
    }

    /// Applies a partial update. Returns false if nothing is pending.
    pub fn update_pending(&mut self, update: PendingUpdate) -> bool {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.apply(update);
                true
            }
            None => false,
        }
    }

    pub fn clear_pending(&mut self) -> Option<PendingLeaveRequest> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingLeaveRequest> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> DialoguePhase {
        match &self.pending {
            None => DialoguePhase::Idle,
            Some(p) if p.days.is_none() => DialoguePhase::AwaitingDays,
            Some(p) if p.start_date.is_none() => DialoguePhase::AwaitingStartDate,
            Some(_) => DialoguePhase::AwaitingConfirmation,
        }
    }
}
