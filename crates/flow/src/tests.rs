//! Handler and routing tests against the in-memory store.

#![allow(clippy::unwrap_used, reason = "test code")]

use chrono::{Duration, Utc};
use tipline_core::constants::{
    DAILY_NOTIFICATION_SUGGESTION, MSG_NO_TIP, MSG_PUSH_ACCEPTED, MSG_PUSH_DECLINED,
    PUSH_NOTIFICATION_SUGGESTION, RANDOM_CATEGORY, RECENT_TIP,
};
use tipline_core::{Intent, Tip};
use tipline_storage::{MemoryTipStore, RegistrationStore};

use crate::context::{TurnContext, TurnRequest};
use crate::handlers::handle_intent;
use crate::response::SystemAction;

fn tip(text: &str, category: &str, age_minutes: i64) -> Tip {
    Tip {
        text: text.to_owned(),
        url: format!("https://example.com/{category}"),
        category: category.to_owned(),
        created_at: Utc::now() - Duration::minutes(age_minutes),
    }
}

fn store() -> MemoryTipStore {
    MemoryTipStore::with_tips(vec![
        tip("design tip", "design", 30),
        tip("tools tip", "tools", 20),
        tip("newest tip", "engagement", 5),
    ])
}

fn screen_ctx() -> TurnContext {
    TurnContext::new("user-1".to_owned(), true)
}

fn text_request(input: &str) -> TurnRequest {
    TurnRequest { raw_input: Some(input.to_owned()), ..TurnRequest::for_intent(Intent::Text) }
}

#[tokio::test]
async fn welcome_on_screen_lists_categories_with_pseudo_entries() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest::for_intent(Intent::Main);
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert!(response.expect_user_response);
    assert!(response.suggestions.contains(&"design".to_owned()));
    assert!(response.suggestions.contains(&RANDOM_CATEGORY.to_owned()));
    assert!(response.suggestions.contains(&RECENT_TIP.to_owned()));
}

#[tokio::test]
async fn welcome_without_screen_stays_audio_only() {
    let store = store();
    let mut ctx = TurnContext::new("user-1".to_owned(), false);
    let request = TurnRequest::for_intent(Intent::Main);
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert!(response.expect_user_response);
    assert!(response.suggestions.is_empty());
    assert!(response.card.is_none());
}

#[tokio::test]
async fn random_tip_renders_card_with_link_on_screen() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest {
        category: Some("design".to_owned()),
        ..TurnRequest::for_intent(Intent::TellTip)
    };
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert!(response.expect_user_response);
    let card = response.card.unwrap();
    assert_eq!(card.text, "design tip");
    assert_eq!(card.button.title, "Learn More!");
}

#[tokio::test]
async fn random_tip_without_screen_closes_with_tip_text() {
    let store = store();
    let mut ctx = TurnContext::new("user-1".to_owned(), false);
    let request = TurnRequest {
        category: Some("tools".to_owned()),
        ..TurnRequest::for_intent(Intent::TellTip)
    };
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert!(!response.expect_user_response);
    assert_eq!(response.speech, vec!["tools tip".to_owned()]);
    assert!(response.card.is_none());
}

#[tokio::test]
async fn empty_category_renders_fallback_not_error() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest {
        category: Some("no-such".to_owned()),
        ..TurnRequest::for_intent(Intent::TellTip)
    };
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert!(response.expect_user_response);
    assert_eq!(response.speech, vec![MSG_NO_TIP.to_owned()]);
}

#[tokio::test]
async fn daily_suggestion_latch_fires_at_most_once() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest::for_intent(Intent::TellTip);

    let first = handle_intent(&store, &mut ctx, &request).await.unwrap();
    assert!(first.suggestions.contains(&DAILY_NOTIFICATION_SUGGESTION.to_owned()));
    assert!(ctx.user.daily_suggestion_asked);

    let second = handle_intent(&store, &mut ctx, &request).await.unwrap();
    assert!(!second.suggestions.contains(&DAILY_NOTIFICATION_SUGGESTION.to_owned()));
}

#[tokio::test]
async fn push_suggestion_latch_fires_at_most_once() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest::for_intent(Intent::TellLatestTip);

    let first = handle_intent(&store, &mut ctx, &request).await.unwrap();
    assert!(first.suggestions.contains(&PUSH_NOTIFICATION_SUGGESTION.to_owned()));

    let second = handle_intent(&store, &mut ctx, &request).await.unwrap();
    assert!(second.suggestions.is_empty());
}

#[tokio::test]
async fn latest_tip_is_the_newest() {
    let store = store();
    let mut ctx = TurnContext::new("user-1".to_owned(), false);
    let request = TurnRequest::for_intent(Intent::TellLatestTip);
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();
    assert_eq!(response.speech, vec!["newest tip".to_owned()]);
}

#[tokio::test]
async fn setup_push_issues_permission_request() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest::for_intent(Intent::SetupPush);
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert_eq!(
        response.system_action,
        Some(SystemAction::UpdatePermission { intent: "tell.latest.tip".to_owned() })
    );
}

#[tokio::test]
async fn granted_permission_registers_and_confirms() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest {
        permission_granted: Some(true),
        updates_user_id: Some("updates-abc".to_owned()),
        ..TurnRequest::for_intent(Intent::Permission)
    };
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert!(!response.expect_user_response);
    assert_eq!(response.speech, vec![MSG_PUSH_ACCEPTED.to_owned()]);

    let targets = store.registered_targets("tell.latest.tip").await.unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].user_id, "updates-abc");
}

#[tokio::test]
async fn denied_permission_closes_without_registering() {
    let store = store();
    let mut ctx = screen_ctx();
    let request = TurnRequest {
        permission_granted: Some(false),
        ..TurnRequest::for_intent(Intent::Permission)
    };
    let response = handle_intent(&store, &mut ctx, &request).await.unwrap();

    assert_eq!(response.speech, vec![MSG_PUSH_DECLINED.to_owned()]);
    assert!(store.registered_targets("tell.latest.tip").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_registration_response_closes_by_status() {
    let store = store();
    let mut ctx = screen_ctx();

    let ok = TurnRequest {
        update_status: Some("OK".to_owned()),
        ..TurnRequest::for_intent(Intent::RegisterUpdate)
    };
    let response = handle_intent(&store, &mut ctx, &ok).await.unwrap();
    assert!(!response.expect_user_response);
    assert!(response.speech[0].contains("daily updates"));

    let cancelled = TurnRequest {
        update_status: Some("CANCELLED".to_owned()),
        ..TurnRequest::for_intent(Intent::RegisterUpdate)
    };
    let response = handle_intent(&store, &mut ctx, &cancelled).await.unwrap();
    assert!(response.speech[0].contains("won't"));
}

// ── free-text routing ─────────────────────────────────────────────────────

#[tokio::test]
async fn raw_input_most_recent_routes_to_latest_tip() {
    let store = store();
    let mut ctx = TurnContext::new("user-1".to_owned(), false);
    let response = handle_intent(&store, &mut ctx, &text_request("the most recent one please"))
        .await
        .unwrap();
    assert_eq!(response.speech, vec!["newest tip".to_owned()]);
}

#[tokio::test]
async fn raw_input_matching_category_scopes_random_tip() {
    let store = store();
    let mut ctx = screen_ctx();
    let response =
        handle_intent(&store, &mut ctx, &text_request("something about design")).await.unwrap();
    assert_eq!(response.card.unwrap().text, "design tip");
}

#[tokio::test]
async fn raw_input_with_no_match_relists_categories() {
    let store = store();
    let mut ctx = screen_ctx();
    let response =
        handle_intent(&store, &mut ctx, &text_request("tell me a joke")).await.unwrap();
    assert!(response.expect_user_response);
    assert!(response.suggestions.contains(&"design".to_owned()));
    assert!(response.suggestions.contains(&RANDOM_CATEGORY.to_owned()));
}

#[tokio::test]
async fn daily_suggestion_phrase_asks_for_category() {
    let store = store();
    let mut ctx = screen_ctx();
    let response = handle_intent(&store, &mut ctx, &text_request(DAILY_NOTIFICATION_SUGGESTION))
        .await
        .unwrap();
    assert!(ctx.session.awaiting_category);
    assert!(response.suggestions.contains(&"tools".to_owned()));
}

#[tokio::test]
async fn awaiting_category_consumes_next_utterance_as_category() {
    let store = store();
    let mut ctx = screen_ctx();
    ctx.session.awaiting_category = true;

    let response = handle_intent(&store, &mut ctx, &text_request("design")).await.unwrap();
    assert!(!ctx.session.awaiting_category);
    assert_eq!(
        response.system_action,
        Some(SystemAction::RegisterUpdate {
            intent: "tell.tip".to_owned(),
            category: "design".to_owned(),
            frequency: "DAILY".to_owned(),
        })
    );
}

#[tokio::test]
async fn awaiting_category_takes_priority_over_keywords() {
    let store = store();
    let mut ctx = screen_ctx();
    ctx.session.awaiting_category = true;

    // "most recent" would normally route to the latest tip.
    let response = handle_intent(&store, &mut ctx, &text_request("most recent")).await.unwrap();
    assert!(matches!(response.system_action, Some(SystemAction::RegisterUpdate { .. })));
}

#[tokio::test]
async fn push_suggestion_phrase_asks_permission() {
    let store = store();
    let mut ctx = screen_ctx();
    let response = handle_intent(&store, &mut ctx, &text_request(PUSH_NOTIFICATION_SUGGESTION))
        .await
        .unwrap();
    assert!(matches!(response.system_action, Some(SystemAction::UpdatePermission { .. })));
}
