//! Usage logging adapters.

mod http_logger;
mod in_memory;

pub use http_logger::HttpUsageLogger;
pub use in_memory::{InMemoryUsageLog, UsageSummary, DEFAULT_USAGE_LOG_CAPACITY};
