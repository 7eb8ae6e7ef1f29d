//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue core to external systems:
//! - `leave` - Leave request stores (HTTP transactions service, in-memory)
//! - `knowledge` - Knowledge services (HTTP retrieval/QA, FAQ base, mock)
//! - `usage` - Usage loggers (HTTP analytics, bounded in-memory log)
//! - `http` - Chat and health endpoints (axum)

pub mod http;
pub mod knowledge;
pub mod leave;
pub mod usage;

mod service_client;

pub use service_client::{ServiceEndpoint, DEFAULT_SERVICE_TIMEOUT};

use std::sync::Arc;

use crate::application::DialogueServices;
use crate::config::AppConfig;
use crate::domain::leave::LeavePolicy;
use crate::ports::{KnowledgeService, LeaveRequestStore, UsageLogger};

use knowledge::{FaqKnowledgeBase, HttpKnowledgeService};
use leave::{HttpLeaveStore, InMemoryLeaveStore};
use usage::{HttpUsageLogger, InMemoryUsageLog};

/// Builds the collaborators named by configuration.
///
/// A configured URL selects the HTTP adapter; otherwise the in-memory one.
pub fn dialogue_services(config: &AppConfig) -> Result<DialogueServices, reqwest::Error> {
    let services = &config.services;
    let endpoint = |url: &str| ServiceEndpoint::new(url).with_timeout(services.timeout());

    let leave_store: Arc<dyn LeaveRequestStore> = match services.transactions() {
        Some(url) => {
            tracing::info!(url, "Using HTTP leave store");
            Arc::new(HttpLeaveStore::new(endpoint(url))?)
        }
        None => {
            tracing::info!(
                allowance_days = config.dialogue.leave_allowance_days,
                "Using in-memory leave store"
            );
            Arc::new(InMemoryLeaveStore::new(LeavePolicy::new(
                config.dialogue.leave_allowance_days,
            )))
        }
    };

    let knowledge: Arc<dyn KnowledgeService> = match services.knowledge_base() {
        Some(url) => {
            tracing::info!(url, "Using HTTP knowledge service");
            Arc::new(HttpKnowledgeService::new(endpoint(url))?)
        }
        None => {
            tracing::info!("Using FAQ knowledge base");
            Arc::new(FaqKnowledgeBase::with_default_entries())
        }
    };

    let usage_logger: Arc<dyn UsageLogger> = match services.analytics() {
        Some(url) => {
            tracing::info!(url, "Using HTTP usage logger");
            Arc::new(HttpUsageLogger::new(endpoint(url))?)
        }
        None => Arc::new(InMemoryUsageLog::new()),
    };

    Ok(DialogueServices::new(leave_store, knowledge, usage_logger))
}
