//! Leave request store adapters.
//!
//! - `HttpLeaveStore` - transactions service over HTTP+JSON
//! - `InMemoryLeaveStore` - allowance-based store for local runs and tests

mod http_store;
mod in_memory;

pub use http_store::HttpLeaveStore;
pub use in_memory::{InMemoryLeaveStore, DEFAULT_SUBMISSION_HISTORY};
