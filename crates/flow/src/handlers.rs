//! Intent handlers and the free-text router.

use tipline_core::constants::{
    CATEGORIES_KEYWORD, DAILY_NOTIFICATION_SUGGESTION, DAILY_UPDATE_INTENT, MSG_AUDIO_WELCOME,
    MSG_DAILY_ACCEPTED, MSG_DAILY_DECLINED, MSG_NO_TIP, MSG_PUSH_ACCEPTED, MSG_PUSH_DECLINED,
    MSG_SELECT_CATEGORY, MSG_WELCOME, PUSH_NOTIFICATION_SUGGESTION, RANDOM_CATEGORY, RECENT_TIP,
    UPDATE_INTENT,
};
use tipline_core::{Intent, Tip};
use tipline_storage::{RegistrationStore, TipStore};

use crate::context::{TurnContext, TurnRequest};
use crate::error::FlowError;
use crate::response::{ConversationResponse, LinkButton, SystemAction, TipCard};

/// Combined store surface the flow needs. Blanket-implemented for any type
/// providing both halves.
pub trait TipRepository: TipStore + RegistrationStore {}

impl<T: TipStore + RegistrationStore> TipRepository for T {}

/// Route one turn to its handler. Exhaustive over [`Intent`] — adding an
/// intent without a handler is a compile error.
///
/// # Errors
/// Store failures and missing platform arguments bubble to the adapter.
pub async fn handle_intent(
    store: &dyn TipRepository,
    ctx: &mut TurnContext,
    request: &TurnRequest,
) -> Result<ConversationResponse, FlowError> {
    match request.intent {
        Intent::Main => welcome(store, ctx).await,
        Intent::TellTip => tell_random_tip(store, ctx, request.category.as_deref()).await,
        Intent::TellLatestTip => tell_latest_tip(store, ctx).await,
        Intent::SetupPush => Ok(ask_permission_to_notify()),
        Intent::Permission => handle_permission_response(store, request).await,
        Intent::RegisterUpdate => Ok(handle_update_response(request)),
        Intent::Text => {
            handle_raw_input(store, ctx, request.raw_input.as_deref().unwrap_or("")).await
        },
    }
}

/// Greeting. Audio-only surfaces get a spoken menu and stay open; screen
/// surfaces get the category chips.
async fn welcome(
    store: &dyn TipRepository,
    ctx: &mut TurnContext,
) -> Result<ConversationResponse, FlowError> {
    if !ctx.has_screen {
        return Ok(ConversationResponse::ask(MSG_AUDIO_WELCOME));
    }
    let mut response = render_categories(store).await?;
    response.speech.insert(0, MSG_WELCOME.to_owned());
    Ok(response)
}

/// "Please select a category" with one chip per known category plus the
/// "random" / "most recent" pseudo-categories.
async fn render_categories(
    store: &dyn TipRepository,
) -> Result<ConversationResponse, FlowError> {
    let mut categories = store.categories().await?;
    categories.push(RANDOM_CATEGORY.to_owned());
    categories.push(RECENT_TIP.to_owned());
    Ok(ConversationResponse::ask(MSG_SELECT_CATEGORY).with_suggestions(categories))
}

/// Shared rendering rule for tips. Empty set → fallback prompt; no screen →
/// speak the tip and end; screen → tip text plus a card with a link.
fn render_tip(ctx: &TurnContext, tip: Option<Tip>) -> ConversationResponse {
    let Some(tip) = tip else {
        return ConversationResponse::ask(MSG_NO_TIP);
    };
    if !ctx.has_screen {
        return ConversationResponse::close(tip.text);
    }
    ConversationResponse::ask(tip.text.clone()).with_card(TipCard {
        text: tip.text,
        button: LinkButton { title: "Learn More!".to_owned(), url: tip.url },
    })
}

async fn tell_random_tip(
    store: &dyn TipRepository,
    ctx: &mut TurnContext,
    category: Option<&str>,
) -> Result<ConversationResponse, FlowError> {
    tracing::debug!(category = category.unwrap_or("<any>"), "telling random tip");
    let tip = store.random_tip(category).await?;
    let mut response = render_tip(ctx, tip);
    // One-shot: offered at most once per user, ever.
    if response.expect_user_response && !ctx.user.daily_suggestion_asked {
        response.add_suggestion(DAILY_NOTIFICATION_SUGGESTION);
        ctx.user.daily_suggestion_asked = true;
    }
    Ok(response)
}

async fn tell_latest_tip(
    store: &dyn TipRepository,
    ctx: &mut TurnContext,
) -> Result<ConversationResponse, FlowError> {
    tracing::debug!("telling latest tip");
    let tip = store.latest_tip().await?;
    let mut response = render_tip(ctx, tip);
    if response.expect_user_response && !ctx.user.push_suggestion_asked {
        response.add_suggestion(PUSH_NOTIFICATION_SUGGESTION);
        ctx.user.push_suggestion_asked = true;
    }
    Ok(response)
}

/// Platform permission prompt tied to the latest-tip intent.
fn ask_permission_to_notify() -> ConversationResponse {
    ConversationResponse::system_request(SystemAction::UpdatePermission {
        intent: UPDATE_INTENT.to_owned(),
    })
}

/// Permission grant → persist the registration; denial → polite close.
async fn handle_permission_response(
    store: &dyn TipRepository,
    request: &TurnRequest,
) -> Result<ConversationResponse, FlowError> {
    if request.permission_granted == Some(true) {
        let user_id = request
            .updates_user_id
            .as_deref()
            .ok_or(FlowError::MissingArgument("UPDATES_USER_ID"))?;
        let created = store.register_for_update(user_id, UPDATE_INTENT).await?;
        tracing::info!(user_id, created, "push notification registration");
        Ok(ConversationResponse::close(MSG_PUSH_ACCEPTED))
    } else {
        Ok(ConversationResponse::close(MSG_PUSH_DECLINED))
    }
}

/// Marks the session as awaiting a category choice and re-renders the list.
async fn ask_category_for_daily_updates(
    store: &dyn TipRepository,
    ctx: &mut TurnContext,
) -> Result<ConversationResponse, FlowError> {
    ctx.session.awaiting_category = true;
    render_categories(store).await
}

/// Platform daily-update registration carrying the chosen category.
fn register_for_daily_updates(category: &str) -> ConversationResponse {
    tracing::debug!(category, "registering for daily updates");
    ConversationResponse::system_request(SystemAction::RegisterUpdate {
        intent: DAILY_UPDATE_INTENT.to_owned(),
        category: category.to_owned(),
        frequency: "DAILY".to_owned(),
    })
}

fn handle_update_response(request: &TurnRequest) -> ConversationResponse {
    if request.update_status.as_deref() == Some("OK") {
        ConversationResponse::close(MSG_DAILY_ACCEPTED)
    } else {
        ConversationResponse::close(MSG_DAILY_DECLINED)
    }
}

/// Keyword router for raw utterances, in priority order: pending category
/// choice, "most recent", "random", "categories", the two suggestion chip
/// phrases, then a category substring match, then the category list again.
async fn handle_raw_input(
    store: &dyn TipRepository,
    ctx: &mut TurnContext,
    input: &str,
) -> Result<ConversationResponse, FlowError> {
    tracing::debug!(input, "routing raw input");
    let normalized = input.to_lowercase();

    if ctx.session.awaiting_category {
        ctx.session.awaiting_category = false;
        return Ok(register_for_daily_updates(input.trim()));
    }
    if normalized.contains(RECENT_TIP) {
        return tell_latest_tip(store, ctx).await;
    }
    if normalized.contains(RANDOM_CATEGORY) {
        return tell_random_tip(store, ctx, None).await;
    }
    if normalized.contains(CATEGORIES_KEYWORD) {
        return render_categories(store).await;
    }
    if normalized.contains(&DAILY_NOTIFICATION_SUGGESTION.to_lowercase()) {
        return ask_category_for_daily_updates(store, ctx).await;
    }
    if normalized.contains(&PUSH_NOTIFICATION_SUGGESTION.to_lowercase()) {
        return Ok(ask_permission_to_notify());
    }

    let categories = store.categories().await?;
    let matched = categories.iter().find(|c| normalized.contains(&c.to_lowercase()));
    match matched {
        Some(category) => {
            tracing::debug!(category = %category, "matched category in raw input");
            let category = category.clone();
            tell_random_tip(store, ctx, Some(&category)).await
        },
        None => {
            tracing::debug!("no category match, re-listing categories");
            render_categories(store).await
        },
    }
}
