//! Debug endpoints mirroring the repository functions, for manual testing.
//!
//! Plain-text bodies on purpose: these exist to poke at the store and the
//! dispatcher from curl, not to serve the platform.

use std::sync::Arc;

use axum::extract::{Query, State};
use serde::Deserialize;
use tipline_core::constants::{MSG_NO_TIP, UPDATE_INTENT};
use tipline_storage::seed_tips;

use crate::api_error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IntentQuery {
    pub intent: Option<String>,
}

pub async fn random_tip(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CategoryQuery>,
) -> Result<String, ApiError> {
    let tip = state.store.random_tip(query.category.as_deref()).await?;
    Ok(match tip {
        Some(tip) => format!("Random tip = {}", tip.text),
        None => MSG_NO_TIP.to_owned(),
    })
}

pub async fn latest_tip(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    let tip = state.store.latest_tip().await?;
    Ok(match tip {
        Some(tip) => format!("Latest tip = {}", tip.text),
        None => MSG_NO_TIP.to_owned(),
    })
}

pub async fn categories(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    let categories = state.store.categories().await?;
    Ok(categories.join(", "))
}

pub async fn restore(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    let seed = seed_tips()?;
    let count = state.store.restore(&seed).await?;
    Ok(format!("Successfully restored the database ({count} tips)."))
}

pub async fn registrations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntentQuery>,
) -> Result<String, ApiError> {
    let intent = query.intent.as_deref().unwrap_or(UPDATE_INTENT);
    let targets = state.store.registered_targets(intent).await?;
    Ok(targets
        .iter()
        .map(|t| format!("{}/{}", t.user_id, t.intent))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Triggers the fan-out. Always answers with the fixed success string; per
/// send outcomes are only logged (fire-and-forget policy).
pub async fn send_notifications(State(state): State<Arc<AppState>>) -> String {
    match state.dispatcher.authorize_and_send(state.store.as_ref()).await {
        Ok(report) => tracing::info!(
            attempted = report.attempted,
            delivered = report.delivered,
            "debug fan-out finished"
        ),
        Err(e) => tracing::error!(error = %e, "debug fan-out failed"),
    }
    "send notification successful".to_owned()
}
