//! Dialogue manager - the conversational core.
//!
//! Consumes one utterance at a time, classifies it with the pattern matcher,
//! merges the result with the session's pending leave request and decides
//! what happens next: prompt for a slot, submit to the leave store, look up
//! status, or delegate to the knowledge service.
//!
//! Collaborator failures never escape `handle`; they become user-facing
//! messages and leave the pending request untouched.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::dialogue::{
    replies, Classification, DialoguePhase, DialogueState, ExtractedSlots, Intent, MatchContext,
    Message, PatternMatcher, Reply, Transcript,
};
use crate::domain::foundation::{EmployeeIdentity, Timestamp};
use crate::domain::leave::{LeaveSubmission, PendingLeaveRequest, PendingUpdate};
use crate::ports::{
    KnowledgeQuery, KnowledgeService, LeaveRequestStore, UsageEntry, UsageLogger,
};

/// Default upper bound on retrieved context items per knowledge query.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Collaborators shared by every session.
#[derive(Clone)]
pub struct DialogueServices {
    pub leave_store: Arc<dyn LeaveRequestStore>,
    pub knowledge: Arc<dyn KnowledgeService>,
    pub usage_logger: Arc<dyn UsageLogger>,
}

impl DialogueServices {
    pub fn new(
        leave_store: Arc<dyn LeaveRequestStore>,
        knowledge: Arc<dyn KnowledgeService>,
        usage_logger: Arc<dyn UsageLogger>,
    ) -> Self {
        Self {
            leave_store,
            knowledge,
            usage_logger,
        }
    }
}

/// Tunables for reply behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueSettings {
    /// Passed to every knowledge query.
    pub max_results: u32,
    /// Artificial pause before bot replies.
    pub reply_delay: Duration,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            reply_delay: Duration::ZERO,
        }
    }
}

/// Drives one chat session.
pub struct DialogueManager {
    identity: EmployeeIdentity,
    state: DialogueState,
    transcript: Transcript,
    matcher: PatternMatcher,
    services: DialogueServices,
    settings: DialogueSettings,
    last_active: Instant,
}

impl DialogueManager {
    pub fn new(
        identity: EmployeeIdentity,
        services: DialogueServices,
        settings: DialogueSettings,
    ) -> Self {
        Self {
            identity,
            state: DialogueState::new(),
            transcript: Transcript::new(),
            matcher: PatternMatcher::new(),
            services,
            settings,
            last_active: Instant::now(),
        }
    }

    pub fn identity(&self) -> &EmployeeIdentity {
        &self.identity
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    pub fn phase(&self) -> DialoguePhase {
        self.state.phase()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Time since the session was opened or last finished a turn.
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    /// Handles one utterance and returns the bot messages it produced.
    ///
    /// The user message and the replies are appended to the transcript.
    /// Blank utterances produce nothing.
    pub async fn handle(&mut self, utterance: &str) -> Vec<Message> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Vec::new();
        }
        self.transcript.push(Message::user(utterance));

        let today = Timestamp::now().date();
        let context = MatchContext::for_pending(self.state.pending(), today);
        let classification = self.matcher.classify(utterance, &context);
        tracing::debug!(
            intent = ?classification.intent,
            rule = ?classification.rule,
            phase = ?self.state.phase(),
            "Classified utterance"
        );

        let reply = self.dispatch(utterance, classification).await;

        if !self.settings.reply_delay.is_zero() {
            tokio::time::sleep(self.settings.reply_delay).await;
        }

        let message = Message::bot(reply.content, reply.kind);
        self.transcript.push(message.clone());
        self.last_active = Instant::now();
        vec![message]
    }

    async fn dispatch(&mut self, utterance: &str, classification: Classification) -> Reply {
        let Classification { intent, slots, .. } = classification;
        match intent {
            Intent::StartLeaveRequest => self.start_leave_request(utterance, slots).await,
            Intent::ProvideSlot => self.provide_start_date(utterance, slots).await,
            Intent::Confirm => self.confirm(utterance).await,
            Intent::Decline => self.decline(),
            Intent::CheckStatus => self.check_status().await,
            Intent::AskQuestion | Intent::Unknown => self.answer_question(utterance).await,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Leave requests
    // ════════════════════════════════════════════════════════════════════════════

    async fn start_leave_request(&mut self, utterance: &str, slots: ExtractedSlots) -> Reply {
        let request = PendingLeaveRequest::new(slots.days, slots.start_date, utterance);
        let replaced = self.state.set_pending(request.clone());
        if let Some(previous) = &replaced {
            tracing::info!(
                identity = %self.identity,
                previous_days = ?previous.days,
                "Replaced pending leave request"
            );
        }

        let reply = match (request.days, request.start_date) {
            (Some(_), Some(_)) if slots.implicit_submit => return self.submit_pending().await,
            (Some(days), Some(date)) => replies::confirm_request(days, date),
            (Some(days), None) => replies::ask_start_date(days),
            (None, _) => replies::ask_days(),
        };

        match replaced {
            Some(previous) => reply.after_replacing(&previous),
            None => reply,
        }
    }

    async fn provide_start_date(&mut self, utterance: &str, slots: ExtractedSlots) -> Reply {
        let Some(pending) = self.state.pending().cloned() else {
            return self.answer_question(utterance).await;
        };

        match (slots.start_date, pending.days) {
            (Some(date), Some(days)) => {
                self.state.update_pending(PendingUpdate::start_date(date));
                replies::start_date_noted(days, date)
            }
            (Some(date), None) => {
                self.state.update_pending(PendingUpdate::start_date(date));
                replies::ask_days()
            }
            (None, _) => replies::invalid_start_date(),
        }
    }

    async fn confirm(&mut self, utterance: &str) -> Reply {
        let Some(pending) = self.state.pending().cloned() else {
            return self.answer_question(utterance).await;
        };

        match pending.missing_slot() {
            Some(slot) => replies::ask_for(slot, &pending),
            None => self.submit_pending().await,
        }
    }

    fn decline(&mut self) -> Reply {
        if let Some(dropped) = self.state.clear_pending() {
            tracing::info!(identity = %self.identity, days = ?dropped.days, "Leave request declined");
        }
        replies::cancelled()
    }

    /// Submits the complete pending request. Clears it only on success.
    async fn submit_pending(&mut self) -> Reply {
        let Some(PendingLeaveRequest {
            days: Some(days),
            start_date: Some(start_date),
            reason,
        }) = self.state.pending().cloned()
        else {
            return replies::ask_days();
        };

        let submission =
            match LeaveSubmission::new(self.identity.clone(), days, reason, start_date) {
                Ok(submission) => submission,
                Err(e) => {
                    tracing::info!(identity = %self.identity, error = %e, "Abandoned invalid leave request");
                    self.state.clear_pending();
                    return replies::invalid_days(days);
                }
            };

        match self.services.leave_store.submit(&submission).await {
            Ok(record) => {
                self.state.clear_pending();
                tracing::info!(
                    identity = %self.identity,
                    request_id = %record.id,
                    days = record.days,
                    status = %record.status,
                    remaining_days = record.remaining_days,
                    "Leave request submitted"
                );
                replies::submission_outcome(&record, start_date)
            }
            Err(e) => {
                tracing::warn!(
                    identity = %self.identity,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Leave submission failed"
                );
                replies::submission_failed()
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Status and knowledge
    // ════════════════════════════════════════════════════════════════════════════

    async fn check_status(&self) -> Reply {
        match self.services.leave_store.latest(&self.identity).await {
            Ok(Some(record)) => replies::latest_request(&record),
            Ok(None) => replies::no_requests_on_record(),
            Err(e) => {
                tracing::warn!(identity = %self.identity, error = %e, "Leave status lookup failed");
                replies::status_failed()
            }
        }
    }

    async fn answer_question(&self, utterance: &str) -> Reply {
        let started = Instant::now();
        let result = self
            .services
            .knowledge
            .query(KnowledgeQuery::new(utterance, self.settings.max_results))
            .await;
        let elapsed = started.elapsed();

        match result {
            Ok(answer) => {
                self.log_usage(
                    UsageEntry::answered(utterance, &answer).with_response_time(elapsed),
                );
                replies::knowledge_answer(&answer.answer, &answer.sources)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Knowledge query failed, using canned answers");
                self.log_usage(UsageEntry::failure(utterance).with_response_time(elapsed));
                replies::canned_answer(utterance).unwrap_or_else(replies::capabilities)
            }
        }
    }

    /// Fire-and-forget; the reply never waits on analytics.
    fn log_usage(&self, entry: UsageEntry) {
        let logger = Arc::clone(&self.services.usage_logger);
        tokio::spawn(async move {
            if let Err(e) = logger.log(entry).await {
                tracing::debug!(error = %e, "Usage log dropped");
            }
        });
    }
}
