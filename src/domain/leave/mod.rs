//! Leave domain module.
//!
//! Value types for the multi-turn leave request: the pending request the
//! dialogue accumulates, the validated submission handed to the store, and
//! the record the store hands back.

mod pending;
mod policy;
mod record;

pub use pending::{LeaveSlot, PendingLeaveRequest, PendingUpdate};
pub use policy::{LeavePolicy, DEFAULT_ALLOWANCE_DAYS};
pub use record::{LeaveRequestRecord, LeaveStatus, LeaveSubmission};
