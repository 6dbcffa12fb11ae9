//! Tip creation. Creating a tip triggers the notification fan-out, modeling
//! the document-creation event of the original store.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tipline_core::{NewTip, Tip};

use crate::api_error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTipRequest {
    pub text: String,
    pub url: String,
    pub category: String,
}

/// Insert a tip, then kick off the push fan-out in the background. The
/// response does not wait for (or report) delivery outcomes.
pub async fn create_tip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTipRequest>,
) -> Result<Json<Tip>, ApiError> {
    let tip = state
        .store
        .add_tip(NewTip { text: req.text, url: req.url, category: req.category })
        .await?;
    tracing::info!(category = %tip.category, "tip created, dispatching notifications");

    let state = Arc::clone(&state);
    tokio::spawn(async move {
        match state.dispatcher.authorize_and_send(state.store.as_ref()).await {
            Ok(report) => tracing::info!(
                attempted = report.attempted,
                delivered = report.delivered,
                "tip-created fan-out finished"
            ),
            Err(e) => tracing::error!(error = %e, "tip-created fan-out failed"),
        }
    });

    Ok(Json(tip))
}
