//! In-memory leave store.
//!
//! Keeps every employee's records in memory and decides each submission
//! against the employee's remaining balance. Can be switched offline to
//! exercise the dialogue's transport-failure handling.
//!
//! Each ledger keeps only the employee's latest record, and the submission
//! history is capped, so memory stays bounded in long-running processes.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{EmployeeIdentity, Timestamp};
use crate::domain::leave::{LeavePolicy, LeaveRequestRecord, LeaveStatus, LeaveSubmission};
use crate::ports::{LeaveRequestStore, LeaveStoreError};

/// Submissions retained for inspection by default.
pub const DEFAULT_SUBMISSION_HISTORY: usize = 1000;

#[derive(Debug, Default)]
struct EmployeeLedger {
    latest: Option<LeaveRequestRecord>,
    used_days: u32,
}

/// In-memory leave store with a per-employee allowance.
#[derive(Debug, Clone)]
pub struct InMemoryLeaveStore {
    policy: LeavePolicy,
    ledgers: Arc<RwLock<HashMap<EmployeeIdentity, EmployeeLedger>>>,
    submissions: Arc<RwLock<VecDeque<LeaveSubmission>>>,
    history_limit: usize,
    available: Arc<AtomicBool>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryLeaveStore {
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            policy,
            ledgers: Arc::new(RwLock::new(HashMap::new())),
            submissions: Arc::new(RwLock::new(VecDeque::new())),
            history_limit: DEFAULT_SUBMISSION_HISTORY,
            available: Arc::new(AtomicBool::new(true)),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Caps the retained submission history; older entries are dropped.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Store whose calls all fail as unavailable.
    pub fn offline() -> Self {
        let store = Self::default();
        store.set_available(false);
        store
    }

    /// Toggles simulated availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Retained submissions received while available, oldest first.
    pub async fn submissions(&self) -> Vec<LeaveSubmission> {
        self.submissions.read().await.iter().cloned().collect()
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }

    /// Remaining balance of an employee.
    pub async fn remaining_days(&self, identity: &EmployeeIdentity) -> u32 {
        let ledgers = self.ledgers.read().await;
        let used = ledgers.get(identity).map(|l| l.used_days).unwrap_or(0);
        self.policy.allowance_days().saturating_sub(used)
    }

    fn ensure_available(&self) -> Result<(), LeaveStoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LeaveStoreError::unavailable("leave store is offline"))
        }
    }
}

impl Default for InMemoryLeaveStore {
    fn default() -> Self {
        Self::new(LeavePolicy::default())
    }
}

#[async_trait]
impl LeaveRequestStore for InMemoryLeaveStore {
    async fn submit(
        &self,
        submission: &LeaveSubmission,
    ) -> Result<LeaveRequestRecord, LeaveStoreError> {
        self.ensure_available()?;
        {
            let mut history = self.submissions.write().await;
            history.push_back(submission.clone());
            while history.len() > self.history_limit {
                history.pop_front();
            }
        }

        let mut ledgers = self.ledgers.write().await;
        let ledger = ledgers.entry(submission.identity.clone()).or_default();

        let remaining = self.policy.allowance_days().saturating_sub(ledger.used_days);
        let status = self.policy.decide(submission.days, remaining);
        if status == LeaveStatus::Approved {
            ledger.used_days += submission.days;
        }

        let record = LeaveRequestRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
            days: submission.days,
            reason: Some(submission.reason.clone()),
            status,
            request_date: Timestamp::now(),
            remaining_days: self.policy.allowance_days().saturating_sub(ledger.used_days),
            start_date: Some(submission.start_date),
        };
        ledger.latest = Some(record.clone());
        Ok(record)
    }

    async fn latest(
        &self,
        identity: &EmployeeIdentity,
    ) -> Result<Option<LeaveRequestRecord>, LeaveStoreError> {
        self.ensure_available()?;
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.get(identity).and_then(|l| l.latest.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jane() -> EmployeeIdentity {
        EmployeeIdentity::new("jane@example.com").unwrap()
    }

    fn submission(days: u32) -> LeaveSubmission {
        LeaveSubmission::new(
            jane(),
            days,
            "vacation",
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn approves_within_allowance() {
        let store = InMemoryLeaveStore::default();

        let record = store.submit(&submission(3)).await.unwrap();

        assert_eq!(record.status, LeaveStatus::Approved);
        assert_eq!(record.remaining_days, 12);
        assert_eq!(store.remaining_days(&jane()).await, 12);
    }

    #[tokio::test]
    async fn rejects_beyond_remaining_balance() {
        let store = InMemoryLeaveStore::new(LeavePolicy::new(5));
        store.submit(&submission(4)).await.unwrap();

        let record = store.submit(&submission(2)).await.unwrap();

        assert_eq!(record.status, LeaveStatus::Rejected);
        assert_eq!(record.remaining_days, 1);
    }

    #[tokio::test]
    async fn latest_returns_newest_record() {
        let store = InMemoryLeaveStore::default();
        store.submit(&submission(1)).await.unwrap();
        let second = store.submit(&submission(2)).await.unwrap();

        let latest = store.latest(&jane()).await.unwrap();

        assert_eq!(latest, Some(second));
    }

    #[tokio::test]
    async fn latest_is_none_without_records() {
        let store = InMemoryLeaveStore::default();
        assert_eq!(store.latest(&jane()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn offline_store_fails_without_recording() {
        let store = InMemoryLeaveStore::offline();

        let err = store.submit(&submission(1)).await.unwrap_err();

        assert!(matches!(err, LeaveStoreError::Unavailable { .. }));
        assert_eq!(store.submission_count().await, 0);
        assert!(store.latest(&jane()).await.is_err());
    }

    #[tokio::test]
    async fn submission_history_is_capped() {
        let store = InMemoryLeaveStore::default().with_history_limit(2);

        for days in 1..=3 {
            store.submit(&submission(days)).await.unwrap();
        }

        assert_eq!(store.submissions().await, vec![submission(2), submission(3)]);
        assert_eq!(store.remaining_days(&jane()).await, 9);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryLeaveStore::default();
        let handle = store.clone();

        handle.submit(&submission(2)).await.unwrap();

        assert_eq!(store.submissions().await, vec![submission(2)]);
    }
}
