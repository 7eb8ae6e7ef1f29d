//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue core and the services it talks to. Adapters implement these
//! ports.
//!
//! - `LeaveRequestStore` - Submits leave requests and looks up the latest one
//! - `KnowledgeService` - Answers free-text policy questions
//! - `UsageLogger` - Best-effort analytics for knowledge queries

mod knowledge_service;
mod leave_store;
mod usage_logger;

pub use knowledge_service::{KnowledgeAnswer, KnowledgeError, KnowledgeQuery, KnowledgeService};
pub use leave_store::{LeaveRequestStore, LeaveStoreError};
pub use usage_logger::{UsageEntry, UsageLogError, UsageLogger};
