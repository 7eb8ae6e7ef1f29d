//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, validation errors)
//! - `leave` - Pending, submitted and recorded leave requests, leave policy
//! - `dialogue` - Intent matching, date parsing, dialogue state, transcript

pub mod dialogue;
pub mod foundation;
pub mod leave;
