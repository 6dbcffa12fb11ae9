//! Conversation flow controller.
//!
//! Maps intents to handlers and decides which response to produce next.
//! Session and user state travel explicitly in the [`TurnContext`]: the
//! adapter decodes them from the platform envelope, handlers update them,
//! and the adapter writes them back out.

#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::must_use_candidate, reason = "Internal functions")]
#![allow(clippy::exhaustive_structs, reason = "Response types are stable")]

mod context;
mod error;
mod handlers;
mod response;

#[cfg(test)]
mod tests;

pub use context::{TurnContext, TurnRequest};
pub use error::FlowError;
pub use handlers::{handle_intent, TipRepository};
pub use response::{ConversationResponse, LinkButton, SystemAction, TipCard};
