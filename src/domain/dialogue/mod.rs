//! Dialogue domain module.
//!
//! Pure pieces of the conversational core: intent classification over an
//! ordered rule list, lenient date parsing, the per-session pending-request
//! state, the transcript, and the bot's reply texts. The dialogue manager in
//! the application layer drives these against the external collaborators.

mod date_parser;
mod intent;
mod matcher;
pub mod replies;
mod state;
mod transcript;

pub use date_parser::DateParser;
pub use intent::{ExtractedSlots, Intent, MatchContext};
pub use matcher::{Classification, MatchRule, PatternMatcher, RULE_ORDER};
pub use replies::Reply;
pub use state::{DialoguePhase, DialogueState};
pub use transcript::{Message, MessageKind, Sender, Transcript};
