//! The conversational webhook adapter.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tipline_flow::handle_intent;

use crate::api_error::ApiError;
use crate::envelope::{WebhookRequest, WebhookResponse};
use crate::AppState;

/// Single webhook endpoint: decode the platform envelope, route the intent,
/// serialize the handler's response with the updated session/user state.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let intent = envelope.intent().ok_or_else(|| {
        let name = envelope
            .inputs
            .first()
            .map_or("<none>", |input| input.intent.as_str());
        ApiError::BadRequest(format!("unhandled intent: {name}"))
    })?;

    let mut ctx = envelope.turn_context();
    let request = envelope.turn_request(intent);
    tracing::debug!(%intent, user_id = %ctx.user_id, "handling conversation turn");

    let response = handle_intent(state.store.as_ref(), &mut ctx, &request).await?;
    Ok(Json(WebhookResponse::from_turn(response, &ctx.session, &ctx.user)))
}
