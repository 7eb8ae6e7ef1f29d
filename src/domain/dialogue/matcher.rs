//! Ordered, rule-based utterance classification.
//!
//! Each [`MatchRule`] is an independent predicate plus extractor. Rules are
//! evaluated in [`RULE_ORDER`] and the first one that matches decides the
//! intent. Utterances no rule claims are [`Intent::Unknown`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::date_parser::{is_calendar_word, DateParser};
use super::intent::{ExtractedSlots, Intent, MatchContext};

/// `<verb> ... <n> day(s)` within a short window.
static VERB_THEN_DAYS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:request|apply|submit|book|arrange|need|take|want)\b(?:\W+\w+){0,4}?\W+(\d+)\s*-?\s*days?\b",
    )
    .expect("valid regex")
});

/// `<n> day(s) [of] leave|vacation|time off|...`
static DAYS_THEN_LEAVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(\d+)\s*-?\s*days?\s+(?:of\s+)?(?:leave|vacation|holidays?|time[\s-]?off|off|pto)\b",
    )
    .expect("valid regex")
});

/// `leave|vacation|time off ... for <n> day(s)`
static LEAVE_FOR_DAYS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:leave|vacation|holiday|time[\s-]?off|pto)\b.*?\bfor\s+(\d+)\s*-?\s*days?\b")
        .expect("valid regex")
});

static START_DATE_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:from|starting|start|beginning|on)\b").expect("valid regex"));

static SUBMIT_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:submit|apply|request)\b").expect("valid regex"));

static CONFIRM_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:yes|yeah|yep|sure|confirm|confirmed|proceed|go ahead)\b").expect("valid regex")
});

static DECLINE_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:no|nope|cancel|decline|abort|stop)\b|\bnever\s*mind\b").expect("valid regex")
});

/// Negations that turn a confirmation cue into a refusal ("don't proceed").
static NEGATION_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:not|never|don't|dont|do not|won't|wont|rather not)\b").expect("valid regex")
});

static STATUS_CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bstatus\b").expect("valid regex"));

static STATUS_SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:leave|request|requests)\b").expect("valid regex"));

static QUESTION_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:what|what's|whats|how|when|where|who|why|which|can|could|is|are|do|does|may|should|will|tell me)\b",
    )
    .expect("valid regex")
});

/// One classification rule. Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// Leave-intent detection with days, optional start date and implicit submit.
    LeaveRequest,
    /// Date cue while a pending request awaits its start date.
    StartDateCue,
    /// Whole-utterance date reply while a start date is awaited.
    SlotReply,
    /// yes/confirm/proceed while a request is pending, with no refusal in
    /// the same utterance.
    Confirmation,
    /// no/cancel/never mind, or a negated confirmation, while a request is
    /// pending.
    Decline,
    /// "status" with "leave" or "request".
    StatusCheck,
    /// Question-shaped utterance for knowledge retrieval.
    Question,
}

/// The fixed priority order of classification rules.
pub const RULE_ORDER: [MatchRule; 7] = [
    MatchRule::LeaveRequest,
    MatchRule::StartDateCue,
    MatchRule::SlotReply,
    MatchRule::Confirmation,
    MatchRule::Decline,
    MatchRule::StatusCheck,
    MatchRule::Question,
];

/// Outcome of classifying one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub slots: ExtractedSlots,
    /// Rule that matched, `None` for unknown utterances.
    pub rule: Option<MatchRule>,
}

impl Classification {
    fn matched(rule: MatchRule, intent: Intent, slots: ExtractedSlots) -> Self {
        Self {
            intent,
            slots,
            rule: Some(rule),
        }
    }

    fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            slots: ExtractedSlots::none(),
            rule: None,
        }
    }
}

impl MatchRule {
    /// Applies this rule to a lower-cased, trimmed utterance.
    fn apply(self, text: &str, ctx: &MatchContext) -> Option<Classification> {
        match self {
            MatchRule::LeaveRequest => {
                let days = extract_days(text)?;
                let start_date = extract_start_date(text, ctx.today);
                let implicit_submit = start_date.is_some() && SUBMIT_CUE.is_match(text);
                Some(Classification::matched(
                    self,
                    Intent::StartLeaveRequest,
                    ExtractedSlots {
                        days: Some(days),
                        start_date,
                        implicit_submit,
                    },
                ))
            }
            MatchRule::StartDateCue => {
                if !ctx.awaiting_start_date() {
                    return None;
                }
                let date = extract_start_date(text, ctx.today)?;
                Some(Classification::matched(
                    self,
                    Intent::ProvideSlot,
                    ExtractedSlots::start_date(Some(date)),
                ))
            }
            MatchRule::SlotReply => {
                if !ctx.awaiting_start_date() {
                    return None;
                }
                match DateParser::new(ctx.today).parse(text) {
                    Some(date) => Some(Classification::matched(
                        self,
                        Intent::ProvideSlot,
                        ExtractedSlots::start_date(Some(date)),
                    )),
                    // A failed date attempt re-prompts; anything else falls through.
                    None if looks_like_date(text) => Some(Classification::matched(
                        self,
                        Intent::ProvideSlot,
                        ExtractedSlots::start_date(None),
                    )),
                    None => None,
                }
            }
            MatchRule::Confirmation => {
                (ctx.has_pending && CONFIRM_CUE.is_match(text) && !is_refusal(text)).then(|| {
                    Classification::matched(self, Intent::Confirm, ExtractedSlots::none())
                })
            }
            MatchRule::Decline => (ctx.has_pending && is_refusal(text)).then(|| {
                Classification::matched(self, Intent::Decline, ExtractedSlots::none())
            }),
            MatchRule::StatusCheck => {
                (STATUS_CUE.is_match(text) && STATUS_SUBJECT.is_match(text)).then(|| {
                    Classification::matched(self, Intent::CheckStatus, ExtractedSlots::none())
                })
            }
            MatchRule::Question => (text.ends_with('?') || QUESTION_OPENER.is_match(text))
                .then(|| {
                    Classification::matched(self, Intent::AskQuestion, ExtractedSlots::none())
                }),
        }
    }
}

/// Classifies utterances by evaluating [`RULE_ORDER`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Rules in the order they are evaluated.
    pub fn rule_order(&self) -> &'static [MatchRule] {
        &RULE_ORDER
    }

    /// Classifies one utterance given the session context.
    pub fn classify(&self, utterance: &str, ctx: &MatchContext) -> Classification {
        let text = utterance.trim().to_lowercase();
        if text.is_empty() {
            return Classification::unknown();
        }

        self.rule_order()
            .iter()
            .find_map(|rule| rule.apply(&text, ctx))
            .unwrap_or_else(Classification::unknown)
    }
}

/// First day count captured by the leave patterns, tried in order.
///
/// A count that does not fit in `u32` makes that pattern miss.
fn extract_days(text: &str) -> Option<u32> {
    [&*VERB_THEN_DAYS, &*DAYS_THEN_LEAVE, &*LEAVE_FOR_DAYS]
        .iter()
        .find_map(|pattern| pattern.captures(text)?.get(1)?.as_str().parse::<u32>().ok())
}

/// Date phrase following the first start-date cue that yields one.
fn extract_start_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parser = DateParser::new(today);
    START_DATE_CUE
        .find_iter(text)
        .find_map(|cue| parser.parse_leading(&text[cue.end()..]))
}

/// Decline cue, or a confirmation cue under negation. Wins over any "yes".
fn is_refusal(text: &str) -> bool {
    DECLINE_CUE.is_match(text) || (CONFIRM_CUE.is_match(text) && NEGATION_CUE.is_match(text))
}

/// Calendar abbreviations that are also everyday English words.
const AMBIGUOUS_CALENDAR_WORDS: [&str; 5] = ["may", "mar", "sat", "sun", "wed"];

/// Heuristic for replies that were meant as a date but did not parse.
///
/// Ambiguous words alone ("May I ...") do not count; a digit always does.
fn looks_like_date(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !AMBIGUOUS_CALENDAR_WORDS.contains(word))
            .any(is_calendar_word)
}
