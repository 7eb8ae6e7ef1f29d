//! Approval policy applied by the leave store.

use super::LeaveStatus;

/// Yearly allowance granted to every employee by default.
pub const DEFAULT_ALLOWANCE_DAYS: u32 = 15;

/// Decides approve/reject by comparing requested days with the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePolicy {
    allowance_days: u32,
}

impl LeavePolicy {
    pub fn new(allowance_days: u32) -> Self {
        Self { allowance_days }
    }

    /// Starting balance for an employee with no approved leave.
    pub fn allowance_days(&self) -> u32 {
        self.allowance_days
    }

    /// Approves when the request fits in the remaining balance.
    pub fn decide(&self, requested_days: u32, remaining_days: u32) -> LeaveStatus {
        if requested_days <= remaining_days {
            LeaveStatus::Approved
        } else {
            LeaveStatus::Rejected
        }
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWANCE_DAYS)
    }
}
