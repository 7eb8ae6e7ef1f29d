//! Bot reply texts.

use chrono::NaiveDate;

use super::transcript::MessageKind;
use crate::domain::leave::{LeaveRequestRecord, LeaveSlot, LeaveStatus, PendingLeaveRequest};

/// A bot reply before it becomes a transcript message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub kind: MessageKind,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::Text,
        }
    }

    pub fn leave(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::LeaveRequest,
        }
    }

    pub fn status(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::Status,
        }
    }

    /// Prefixes a notice that an earlier pending request was dropped.
    pub fn after_replacing(mut self, replaced: &PendingLeaveRequest) -> Self {
        let earlier = match replaced.days {
            Some(days) => format!("your earlier request for {}", day_count(days)),
            None => "your earlier leave request".to_string(),
        };
        self.content = format!("I've replaced {} with this one. {}", earlier, self.content);
        self
    }
}

fn day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ════════════════════════════════════════════════════════════════════════════════
// Leave requests
// ════════════════════════════════════════════════════════════════════════════════

pub fn ask_start_date(days: u32) -> Reply {
    Reply::leave(format!(
        "Got it: {} of leave. What date would you like your leave to start? (e.g., 2025-09-15)",
        day_count(days)
    ))
}

pub fn ask_days() -> Reply {
    Reply::leave("How many days of leave would you like to request?")
}

pub fn ask_for(slot: LeaveSlot, pending: &PendingLeaveRequest) -> Reply {
    match (slot, pending.days) {
        (LeaveSlot::StartDate, Some(days)) => ask_start_date(days),
        _ => ask_days(),
    }
}

pub fn confirm_request(days: u32, start_date: NaiveDate) -> Reply {
    Reply::leave(format!(
        "You're requesting {} of leave starting {}. Would you like to proceed?",
        day_count(days),
        format_date(start_date)
    ))
}

pub fn start_date_noted(days: u32, start_date: NaiveDate) -> Reply {
    Reply::leave(format!(
        "Great, your leave would start on {}. That's {} of leave. Would you like to proceed?",
        format_date(start_date),
        day_count(days)
    ))
}

pub fn invalid_start_date() -> Reply {
    Reply::leave(
        "Sorry, I couldn't understand that date. Please give the start date like 2025-09-15 or September 15, 2025.",
    )
}

pub fn submission_outcome(record: &LeaveRequestRecord, start_date: NaiveDate) -> Reply {
    match record.status {
        LeaveStatus::Approved => Reply::leave(format!(
            "✅ Your leave request for {} starting {} has been approved. You have {} remaining.",
            day_count(record.days),
            format_date(start_date),
            day_count(record.remaining_days)
        )),
        LeaveStatus::Rejected => Reply::leave(format!(
            "❌ Your leave request for {} was rejected: you only have {} remaining.",
            day_count(record.days),
            day_count(record.remaining_days)
        )),
    }
}

pub fn submission_failed() -> Reply {
    Reply::text(
        "Sorry, I couldn't submit your leave request right now. Please try again by replying \"yes\".",
    )
}

pub fn invalid_days(days: u32) -> Reply {
    Reply::leave(format!(
        "A leave request needs a positive number of days, but I got {}. I've cancelled it; tell me how many days you need to start again.",
        days
    ))
}

pub fn cancelled() -> Reply {
    Reply::text("No problem, I've cancelled your leave request.")
}

// ════════════════════════════════════════════════════════════════════════════════
// Status
// ════════════════════════════════════════════════════════════════════════════════

pub fn latest_request(record: &LeaveRequestRecord) -> Reply {
    let starting = record
        .start_date
        .map(|date| format!(" starting {}", format_date(date)))
        .unwrap_or_default();
    Reply::status(format!(
        "Your latest leave request for {}{} is {}. It was submitted on {}. Remaining balance: {}.",
        day_count(record.days),
        starting,
        record.status,
        format_date(record.request_date.date()),
        day_count(record.remaining_days)
    ))
}

pub fn no_requests_on_record() -> Reply {
    Reply::status("You have no leave requests on record.")
}

pub fn status_failed() -> Reply {
    Reply::text("Sorry, I couldn't check your leave status right now. Please try again in a moment.")
}

// ════════════════════════════════════════════════════════════════════════════════
// Knowledge
// ════════════════════════════════════════════════════════════════════════════════

pub fn knowledge_answer(answer: &str, sources: &[String]) -> Reply {
    if sources.is_empty() {
        Reply::text(answer)
    } else {
        Reply::text(format!("{}\n\nSources: {}", answer, sources.join(", ")))
    }
}

/// Keyword-matched answers used when knowledge retrieval is unavailable.
const CANNED_ANSWERS: &[(&str, &str)] = &[
    (
        "travel policy",
        "Business travel must be approved by your manager before booking. Book through the company travel portal and submit receipts for expenses within 30 days of your return.",
    ),
    (
        "remote work",
        "Employees may work remotely up to 3 days per week with manager approval. Core collaboration hours are 10:00 to 15:00 in your local time zone.",
    ),
    (
        "vacation",
        "Full-time employees receive 15 days of paid vacation per year. You can request leave right here, for example: \"I need 3 days leave starting 2025-09-15\".",
    ),
    (
        "sick leave",
        "You are entitled to 10 days of paid sick leave per year. Notify your manager as early as possible; absences longer than 3 days need a doctor's note.",
    ),
    (
        "benefits",
        "Benefits include health, dental and vision coverage, a retirement savings plan with company match, and an annual learning budget. See the HR portal for details.",
    ),
    (
        "it support",
        "For IT support, open a ticket on the helpdesk portal or email the IT team. For urgent issues such as a locked account, call the IT hotline.",
    ),
];

/// First canned answer whose keyword occurs in the lower-cased utterance.
pub fn canned_answer(utterance: &str) -> Option<Reply> {
    let lowered = utterance.to_lowercase();
    CANNED_ANSWERS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, answer)| Reply::text(*answer))
}

pub fn capabilities() -> Reply {
    Reply::text(
        "I couldn't reach the knowledge base just now. I can help you with:\n\
         • Company policies such as travel, remote work, vacation and sick leave\n\
         • Benefits and IT support questions\n\
         • Requesting leave, e.g. \"I need 3 days leave starting 2025-09-15\"\n\
         • Checking the status of your leave request",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn sept_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    fn record(status: LeaveStatus, days: u32, remaining: u32) -> LeaveRequestRecord {
        LeaveRequestRecord {
            id: "42".to_string(),
            days,
            reason: Some("vacation".to_string()),
            status,
            request_date: Timestamp::now(),
            remaining_days: remaining,
            start_date: Some(sept_15()),
        }
    }

    mod leave {
        use super::*;

        #[test]
        fn confirm_prompt_ends_with_question() {
            let reply = confirm_request(5, sept_15());
            assert!(reply.content.contains("5 days"));
            assert!(reply.content.contains("2025-09-15"));
            assert!(reply.content.ends_with("Would you like to proceed?"));
            assert_eq!(reply.kind, MessageKind::LeaveRequest);
        }

        #[test]
        fn singular_day() {
            assert!(ask_start_date(1).content.contains("1 day of leave"));
        }

        #[test]
        fn approval_mentions_days() {
            let reply = submission_outcome(&record(LeaveStatus::Approved, 3, 12), sept_15());
            assert!(reply.content.contains("approved"));
            assert!(reply.content.contains("3 days"));
            assert!(reply.content.contains("12 days"));
        }

        #[test]
        fn rejection_mentions_remaining() {
            let reply = submission_outcome(&record(LeaveStatus::Rejected, 20, 15), sept_15());
            assert!(reply.content.contains("rejected"));
            assert!(reply.content.contains("15 days remaining"));
        }

        #[test]
        fn replacement_notice_prefixes_prompt() {
            let earlier = PendingLeaveRequest::new(Some(2), None, "2 days leave");
            let reply = ask_start_date(4).after_replacing(&earlier);
            assert!(reply.content.starts_with("I've replaced your earlier request for 2 days"));
            assert!(reply.content.contains("4 days"));
        }
    }

    mod status {
        use super::*;

        #[test]
        fn renders_days_status_and_date() {
            let reply = latest_request(&record(LeaveStatus::Approved, 3, 12));
            assert!(reply.content.contains("3 days"));
            assert!(reply.content.contains("approved"));
            assert!(reply.content.contains("2025-09-15"));
            assert_eq!(reply.kind, MessageKind::Status);
        }

        #[test]
        fn empty_history_message() {
            assert!(no_requests_on_record()
                .content
                .contains("no leave requests on record"));
        }
    }

    mod knowledge {
        use super::*;

        #[test]
        fn appends_sources() {
            let reply = knowledge_answer("Answer.", &["FAQ:1".to_string(), "handbook.pdf".to_string()]);
            assert_eq!(reply.content, "Answer.\n\nSources: FAQ:1, handbook.pdf");
        }

        #[test]
        fn omits_empty_sources() {
            assert_eq!(knowledge_answer("Answer.", &[]).content, "Answer.");
        }

        #[test]
        fn canned_answer_matches_keyword() {
            let reply = canned_answer("What is Remote Work policy?").unwrap();
            assert!(reply.content.contains("work remotely"));
        }

        #[test]
        fn canned_answer_first_match_wins() {
            let reply = canned_answer("vacation and benefits").unwrap();
            assert!(reply.content.contains("paid vacation"));
        }

        #[test]
        fn no_canned_answer_for_unrelated_text() {
            assert!(canned_answer("what's for lunch").is_none());
        }
    }
}
