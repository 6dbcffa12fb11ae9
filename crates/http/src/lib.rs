//! HTTP surface for tipline: the conversational webhook plus debug endpoints
//! mirroring the repository functions.

#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::must_use_candidate, reason = "Internal functions")]

pub mod api_error;
mod envelope;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use tipline_flow::TipRepository;
use tipline_notify::NotificationDispatcher;

pub use api_error::ApiError;
pub use envelope::{WebhookRequest, WebhookResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Tip and registration store.
    pub store: Arc<dyn TipRepository>,
    /// Push notification dispatcher.
    pub dispatcher: Arc<NotificationDispatcher>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(handlers::conversation::webhook))
        .route("/tips", post(handlers::tips::create_tip))
        .route("/debug/random-tip", get(handlers::debug::random_tip))
        .route("/debug/latest-tip", get(handlers::debug::latest_tip))
        .route("/debug/categories", get(handlers::debug::categories))
        .route("/debug/restore", post(handlers::debug::restore))
        .route("/debug/registrations", get(handlers::debug::registrations))
        .route("/debug/send-notifications", post(handlers::debug::send_notifications))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
