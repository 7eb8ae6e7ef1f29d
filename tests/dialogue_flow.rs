//! Integration tests for the dialogue core.
//!
//! Drive a `DialogueManager` through the public API with in-memory and mock
//! collaborators and check the multi-turn leave flow, status checks and the
//! knowledge fallback end to end.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;

use buddy::adapters::knowledge::{FaqKnowledgeBase, MockKnowledgeService};
use buddy::adapters::leave::InMemoryLeaveStore;
use buddy::adapters::usage::InMemoryUsageLog;
use buddy::application::{DialogueManager, DialogueServices, DialogueSettings};
use buddy::domain::dialogue::{DialoguePhase, Message, MessageKind};
use buddy::domain::foundation::EmployeeIdentity;
use buddy::domain::leave::LeaveStatus;
use buddy::ports::{KnowledgeService, LeaveRequestStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Session {
    manager: DialogueManager,
    store: InMemoryLeaveStore,
    usage: InMemoryUsageLog,
}

fn session_with(store: InMemoryLeaveStore, knowledge: Arc<dyn KnowledgeService>) -> Session {
    let usage = InMemoryUsageLog::new();
    let services = DialogueServices::new(
        Arc::new(store.clone()),
        knowledge,
        Arc::new(usage.clone()),
    );
    Session {
        manager: DialogueManager::new(
            EmployeeIdentity::new("sam@example.com").unwrap(),
            services,
            DialogueSettings::default(),
        ),
        store,
        usage,
    }
}

fn session() -> Session {
    session_with(
        InMemoryLeaveStore::default(),
        Arc::new(FaqKnowledgeBase::with_default_entries()),
    )
}

async fn say(session: &mut Session, text: &str) -> Message {
    let replies = session.manager.handle(text).await;
    assert_eq!(replies.len(), 1, "expected exactly one reply to {:?}", text);
    replies.into_iter().next().unwrap()
}

fn sept_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
}

// =============================================================================
// Leave request flow
// =============================================================================

#[tokio::test]
async fn full_leave_request_conversation() {
    let mut s = session();

    let prompt = say(&mut s, "Hi, I'd like to request 3 days of vacation").await;
    assert!(prompt.content.contains("What date would you like your leave to start?"));

    let confirm = say(&mut s, "September 15th, 2025").await;
    assert!(confirm.content.ends_with("Would you like to proceed?"));
    assert!(confirm.content.contains("2025-09-15"));

    let outcome = say(&mut s, "Yes, please proceed").await;
    assert!(outcome.content.contains("approved"));
    assert!(outcome.content.contains("3 days"));
    assert!(!outcome.content.contains("What date"));
    assert_eq!(outcome.kind, MessageKind::LeaveRequest);
    assert_eq!(s.manager.phase(), DialoguePhase::Idle);

    let submissions = s.store.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].days, 3);
    assert_eq!(submissions[0].start_date, sept_15());
    assert_eq!(submissions[0].reason, "Hi, I'd like to request 3 days of vacation");
    assert_eq!(submissions[0].identity.as_str(), "sam@example.com");
}

#[tokio::test]
async fn both_slots_up_front_go_straight_to_confirmation() {
    let mut s = session();

    let reply = say(&mut s, "I need 5 days leave starting 2025-09-15").await;

    assert!(reply.content.ends_with("Would you like to proceed?"));
    assert!(!reply.content.contains("What date"));
    let pending = s.manager.state().pending().unwrap();
    assert_eq!(pending.days, Some(5));
    assert_eq!(pending.start_date, Some(sept_15()));
}

#[tokio::test]
async fn approval_round_trip_reports_remaining_balance() {
    let mut s = session();
    say(&mut s, "I need 3 days leave starting 2025-09-15 for a family trip").await;

    let reply = say(&mut s, "confirm").await;

    let identity = EmployeeIdentity::new("sam@example.com").unwrap();
    let record = s.store.latest(&identity).await.unwrap().unwrap();
    assert_eq!(record.status, LeaveStatus::Approved);
    assert_eq!(record.remaining_days, 12);
    assert!(reply.content.contains('3'));
    assert!(reply.content.contains("12 days remaining"));
}

#[tokio::test]
async fn confirmation_before_date_never_submits() {
    let mut s = session();
    say(&mut s, "I need 2 days off").await;

    for _ in 0..3 {
        let reply = say(&mut s, "yes").await;
        assert!(reply.content.contains("What date would you like"));
    }

    assert_eq!(s.store.submission_count().await, 0);
    assert_eq!(s.manager.phase(), DialoguePhase::AwaitingStartDate);
}

#[tokio::test]
async fn outage_during_submission_is_recoverable() {
    let mut s = session();
    say(&mut s, "I need 4 days leave starting 2025-09-15").await;
    let pending_before = s.manager.state().pending().cloned();
    s.store.set_available(false);

    let failure = say(&mut s, "yes").await;

    assert!(failure.content.contains("try again"));
    assert_eq!(s.manager.state().pending().cloned(), pending_before);

    s.store.set_available(true);
    let success = say(&mut s, "yes").await;
    assert!(success.content.contains("approved"));
    assert_eq!(s.store.submission_count().await, 1);
}

#[tokio::test]
async fn second_request_replaces_first_and_says_so() {
    let mut s = session();
    say(&mut s, "I need 2 days leave").await;

    let reply = say(&mut s, "Sorry, make that 6 days leave starting 2025-09-15").await;

    assert!(reply.content.starts_with("I've replaced your earlier request"));
    assert!(reply.content.ends_with("Would you like to proceed?"));
    assert_eq!(s.manager.state().pending().and_then(|p| p.days), Some(6));
}

// =============================================================================
// Status checks
// =============================================================================

#[tokio::test]
async fn status_without_history_is_not_an_error() {
    let mut s = session();

    let reply = say(&mut s, "What's the status of my leave request?").await;

    assert!(reply.content.contains("no leave requests on record"));
    assert_eq!(reply.kind, MessageKind::Status);
}

#[tokio::test]
async fn status_after_submission_shows_latest_request() {
    let mut s = session();
    say(&mut s, "Please submit 2 days leave from 2025-09-15").await;

    let reply = say(&mut s, "leave request status").await;

    assert!(reply.content.contains("2 days"));
    assert!(reply.content.contains("approved"));
    assert!(reply.content.contains("2025-09-15"));
}

// =============================================================================
// Knowledge fallback
// =============================================================================

#[tokio::test]
async fn remote_work_question_with_retrieval_down_gets_canned_answer() {
    let mut s = session_with(
        InMemoryLeaveStore::default(),
        Arc::new(MockKnowledgeService::unavailable()),
    );

    let reply = say(&mut s, "What is remote work policy?").await;

    assert!(reply.content.contains("work remotely"));
    assert!(!reply.content.contains("I can help you with"));
}

#[tokio::test]
async fn faq_answers_cite_sources() {
    let mut s = session();

    let reply = say(&mut s, "How do I reset my password?").await;

    assert!(reply.content.contains("Sources: FAQ:5"));
}

#[tokio::test]
async fn knowledge_queries_are_logged() {
    let mut s = session();

    say(&mut s, "How do I reset my password?").await;

    for _ in 0..50 {
        if !s.usage.is_empty().await {
            break;
        }
        tokio::task::yield_now().await;
    }
    let entries = s.usage.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "How do I reset my password?");
    assert!(entries[0].sources_count >= 1);
}

// =============================================================================
// Properties
// =============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn days_leave_prompts_once_for_start_date(n in 1u32..365) {
        let (replies, days) = runtime().block_on(async {
            let mut s = session();
            let replies = s.manager.handle(&format!("{} days leave", n)).await;
            (replies, s.manager.state().pending().and_then(|p| p.days))
        });

        prop_assert_eq!(replies.len(), 1);
        prop_assert!(replies[0].content.contains("What date would you like"));
        prop_assert_eq!(days, Some(n));
    }

    #[test]
    fn request_days_then_date_fills_slot(n in 1u32..365, offset in 0i64..400) {
        let date = sept_15() + chrono::Duration::days(offset);
        let (reply, pending) = runtime().block_on(async {
            let mut s = session();
            s.manager.handle(&format!("request {} days", n)).await;
            let replies = s.manager.handle(&date.format("%Y-%m-%d").to_string()).await;
            (replies, s.manager.state().pending().cloned())
        });

        prop_assert_eq!(reply.len(), 1);
        prop_assert!(reply[0].content.ends_with("Would you like to proceed?"));
        let pending = pending.unwrap();
        prop_assert_eq!(pending.days, Some(n));
        prop_assert_eq!(pending.start_date, Some(date));
    }
}
