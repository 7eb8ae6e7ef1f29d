//! Knowledge service adapters.
//!
//! - `HttpKnowledgeService` - retrieval/QA service over HTTP+JSON
//! - `FaqKnowledgeBase` - answers from seeded FAQ entries by term matching
//! - `MockKnowledgeService` - scripted answers and errors for tests

mod faq;
mod http_service;
mod mock;

pub use faq::{FaqEntry, FaqKnowledgeBase, NO_RELEVANT_INFORMATION};
pub use http_service::HttpKnowledgeService;
pub use mock::MockKnowledgeService;
