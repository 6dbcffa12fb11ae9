//! Core domain types and configuration for tipline.

#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::must_use_candidate, reason = "Internal functions")]
#![allow(clippy::exhaustive_structs, reason = "Domain types are stable")]
#![allow(clippy::exhaustive_enums, reason = "Intent set is closed by design")]

pub mod config;
pub mod constants;
mod env_config;
mod intent;
mod state;
mod tip;

pub use config::Config;
pub use env_config::{env_parse_with_default, env_string_with_default};
pub use intent::Intent;
pub use state::{SessionState, UserState};
pub use tip::{NewTip, NotificationTarget, Tip};
