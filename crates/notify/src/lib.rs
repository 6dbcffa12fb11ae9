//! Proactive push notification dispatcher.
//!
//! Authorizes against the push API with a service-account token exchange,
//! then fan-out-sends one notification per registered target. Per-target
//! failures are logged and swallowed; callers only see the aggregate
//! [`DispatchReport`] (documented fire-and-forget policy).

#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::must_use_candidate, reason = "Internal functions")]

mod auth;
mod dispatcher;
mod error;

pub use auth::ServiceAccountKey;
pub use dispatcher::{
    DispatchPhase, DispatchReport, NotificationDispatcher, PushSender,
};
pub use error::NotifyError;
