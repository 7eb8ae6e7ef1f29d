//! FAQ-backed knowledge base.
//!
//! Answers from a fixed set of FAQ entries. A query is split into terms
//! (longer than two characters, first four only) and an entry matches when
//! its question or answer contains any term, case-insensitively. Entries
//! matching more terms rank first.

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{KnowledgeAnswer, KnowledgeError, KnowledgeQuery, KnowledgeService};

const MAX_TERMS: usize = 4;

/// Answer given when no entry matches.
pub const NO_RELEVANT_INFORMATION: &str = "I don't have any relevant information in my knowledge base to answer your question. Please try rephrasing your question.";

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub id: u32,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

impl FaqEntry {
    pub fn new(id: u32, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn source_id(&self) -> String {
        format!("FAQ:{}", self.id)
    }

    fn matched_terms(&self, terms: &[String]) -> usize {
        let question = self.question.to_lowercase();
        let answer = self.answer.to_lowercase();
        terms
            .iter()
            .filter(|t| question.contains(t.as_str()) || answer.contains(t.as_str()))
            .count()
    }
}

/// In-memory [`KnowledgeService`] over FAQ entries.
#[derive(Debug, Clone)]
pub struct FaqKnowledgeBase {
    entries: Arc<Vec<FaqEntry>>,
}

impl FaqKnowledgeBase {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Knowledge base seeded with common HR and IT questions.
    pub fn with_default_entries() -> Self {
        Self::new(vec![
            FaqEntry::new(
                1,
                "How many vacation days do I get?",
                "Full-time employees get 15 days of paid vacation per year, accrued monthly.",
            )
            .with_category("Leave"),
            FaqEntry::new(
                2,
                "Can I work remotely?",
                "Remote work is allowed up to 3 days per week with manager approval.",
            )
            .with_category("Policy"),
            FaqEntry::new(
                3,
                "How do I report a sick day?",
                "Tell your manager before your shift starts. Sick leave over 3 days needs a doctor's note.",
            )
            .with_category("Leave"),
            FaqEntry::new(
                4,
                "How do I book business travel?",
                "Get manager approval first, then book through the travel portal. Expenses are reimbursed on receipts.",
            )
            .with_category("Policy"),
            FaqEntry::new(
                5,
                "How do I reset my password?",
                "Use the self-service portal or open an IT helpdesk ticket.",
            )
            .with_category("IT"),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching the query, best first, at most `limit`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&FaqEntry> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &FaqEntry)> = self
            .entries
            .iter()
            .map(|entry| (entry.matched_terms(&terms), entry))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }
}

impl Default for FaqKnowledgeBase {
    fn default() -> Self {
        Self::with_default_entries()
    }
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| t.chars().count() > 2)
        .take(MAX_TERMS)
        .collect()
}

#[async_trait]
impl KnowledgeService for FaqKnowledgeBase {
    async fn query(&self, query: KnowledgeQuery) -> Result<KnowledgeAnswer, KnowledgeError> {
        if query.query.trim().is_empty() {
            return Err(KnowledgeError::InvalidRequest(
                "Query cannot be empty".to_string(),
            ));
        }

        let matches = self.search(&query.query, query.max_results as usize);
        if matches.is_empty() {
            return Ok(KnowledgeAnswer::new(NO_RELEVANT_INFORMATION));
        }

        let answer = matches
            .iter()
            .map(|e| e.answer.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(matches
            .iter()
            .fold(KnowledgeAnswer::new(answer), |acc, e| {
                acc.with_source(e.source_id())
            }))
    }
}
