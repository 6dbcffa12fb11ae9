//! Platform request/response envelopes for the conversational webhook.
//!
//! Field names follow the platform's camelCase JSON. Only the slices of the
//! envelope this action reads are modeled; unknown fields are ignored on the
//! way in and omitted on the way out.

use serde::{Deserialize, Serialize};
use tipline_core::{Intent, SessionState, UserState};
use tipline_flow::{ConversationResponse, SystemAction, TurnContext, TurnRequest};

const SCREEN_CAPABILITY: &str = "actions.capability.SCREEN_OUTPUT";

const PERMISSION_ARG: &str = "PERMISSION";
const UPDATES_USER_ID_ARG: &str = "UPDATES_USER_ID";
const REGISTER_UPDATE_ARG: &str = "REGISTER_UPDATE";
const CATEGORY_ARG: &str = "category";

// ── inbound ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookRequest {
    pub user: EnvelopeUser,
    pub conversation: EnvelopeConversation,
    pub inputs: Vec<EnvelopeInput>,
    pub surface: EnvelopeSurface,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeUser {
    pub user_id: Option<String>,
    pub user_storage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeConversation {
    pub conversation_id: Option<String>,
    pub conversation_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeInput {
    pub intent: String,
    pub raw_inputs: Vec<RawInput>,
    pub arguments: Vec<EnvelopeArgument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInput {
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeArgument {
    pub name: String,
    pub text_value: Option<String>,
    pub bool_value: Option<bool>,
    pub extension: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeSurface {
    pub capabilities: Vec<EnvelopeCapability>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeCapability {
    pub name: String,
}

impl WebhookRequest {
    /// The intent of the first input, if it names one this action handles.
    #[must_use]
    pub fn intent(&self) -> Option<Intent> {
        self.inputs.first().and_then(|input| Intent::from_name(&input.intent))
    }

    fn argument(&self, name: &str) -> Option<&EnvelopeArgument> {
        self.inputs.first().and_then(|input| input.arguments.iter().find(|a| a.name == name))
    }

    /// Decode the turn context: surface capability, user identity, and the
    /// session/user state blobs carried by the platform.
    #[must_use]
    pub fn turn_context(&self) -> TurnContext {
        let has_screen =
            self.surface.capabilities.iter().any(|c| c.name == SCREEN_CAPABILITY);
        let user_id = self.user.user_id.clone().unwrap_or_else(|| "anonymous".to_owned());
        TurnContext {
            user_id,
            has_screen,
            session: SessionState::from_token(self.conversation.conversation_token.as_deref()),
            user: UserState::from_storage(self.user.user_storage.as_deref()),
        }
    }

    /// Decode the handler-facing request for `intent`.
    #[must_use]
    pub fn turn_request(&self, intent: Intent) -> TurnRequest {
        TurnRequest {
            intent,
            raw_input: self
                .inputs
                .first()
                .and_then(|input| input.raw_inputs.first())
                .and_then(|raw| raw.query.clone()),
            category: self.argument(CATEGORY_ARG).and_then(|a| a.text_value.clone()),
            permission_granted: self.argument(PERMISSION_ARG).and_then(|a| a.bool_value),
            updates_user_id: self
                .argument(UPDATES_USER_ID_ARG)
                .and_then(|a| a.text_value.clone()),
            update_status: self.argument(REGISTER_UPDATE_ARG).and_then(|a| {
                a.extension
                    .as_ref()
                    .and_then(|ext| ext.get("status"))
                    .and_then(|status| status.as_str())
                    .map(str::to_owned)
            }),
        }
    }
}

// ── outbound ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub conversation_token: String,
    pub user_storage: String,
    pub expect_user_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_inputs: Option<Vec<ExpectedInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_response: Option<FinalResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedInput {
    pub input_prompt: InputPrompt,
    pub possible_intents: Vec<PossibleIntent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPrompt {
    pub rich_initial_prompt: RichResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResponse {
    pub rich_response: RichResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichResponse {
    pub items: Vec<ResponseItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_response: Option<SimpleResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_card: Option<BasicCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub text_to_speech: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicCard {
    pub formatted_text: String,
    pub buttons: Vec<CardButton>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardButton {
    pub title: String,
    pub open_url_action: OpenUrlAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenUrlAction {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PossibleIntent {
    pub intent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value_data: Option<serde_json::Value>,
}

impl WebhookResponse {
    /// Serialize a handler response, carrying the updated session/user state
    /// back to the platform.
    #[must_use]
    pub fn from_turn(
        response: ConversationResponse,
        session: &SessionState,
        user: &UserState,
    ) -> Self {
        let rich = RichResponse {
            items: build_items(&response),
            suggestions: response
                .suggestions
                .iter()
                .map(|title| Suggestion { title: title.clone() })
                .collect(),
        };

        if response.expect_user_response {
            Self {
                conversation_token: session.to_token(),
                user_storage: user.to_storage(),
                expect_user_response: true,
                expected_inputs: Some(vec![ExpectedInput {
                    input_prompt: InputPrompt { rich_initial_prompt: rich },
                    possible_intents: vec![possible_intent(response.system_action.as_ref())],
                }]),
                final_response: None,
            }
        } else {
            Self {
                conversation_token: session.to_token(),
                user_storage: user.to_storage(),
                expect_user_response: false,
                expected_inputs: None,
                final_response: Some(FinalResponse { rich_response: rich }),
            }
        }
    }
}

fn build_items(response: &ConversationResponse) -> Vec<ResponseItem> {
    let mut items: Vec<ResponseItem> = response
        .speech
        .iter()
        .map(|text| ResponseItem {
            simple_response: Some(SimpleResponse { text_to_speech: text.clone() }),
            basic_card: None,
        })
        .collect();
    if let Some(card) = &response.card {
        items.push(ResponseItem {
            simple_response: None,
            basic_card: Some(BasicCard {
                formatted_text: card.text.clone(),
                buttons: vec![CardButton {
                    title: card.button.title.clone(),
                    open_url_action: OpenUrlAction { url: card.button.url.clone() },
                }],
            }),
        });
    }
    items
}

fn possible_intent(action: Option<&SystemAction>) -> PossibleIntent {
    match action {
        Some(SystemAction::UpdatePermission { intent }) => PossibleIntent {
            intent: Intent::Permission.as_str().to_owned(),
            input_value_data: Some(serde_json::json!({
                "@type": "type.googleapis.com/google.actions.v2.UpdatePermissionValueSpec",
                "intent": intent,
            })),
        },
        Some(SystemAction::RegisterUpdate { intent, category, frequency }) => PossibleIntent {
            intent: Intent::RegisterUpdate.as_str().to_owned(),
            input_value_data: Some(serde_json::json!({
                "@type": "type.googleapis.com/google.actions.v2.RegisterUpdateValueSpec",
                "intent": intent,
                "arguments": [{"name": "category", "textValue": category}],
                "triggerContext": {"timeContext": {"frequency": frequency}},
            })),
        },
        None => PossibleIntent {
            intent: Intent::Text.as_str().to_owned(),
            input_value_data: None,
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use super::*;

    fn request_json(intent: &str) -> WebhookRequest {
        serde_json::from_value(serde_json::json!({
            "user": {"userId": "user-1", "userStorage": "{\"pushSuggestionAsked\":true}"},
            "conversation": {
                "conversationId": "conv-1",
                "conversationToken": "{\"awaitingCategory\":true}"
            },
            "inputs": [{
                "intent": intent,
                "rawInputs": [{"query": "most recent"}],
                "arguments": [
                    {"name": "PERMISSION", "boolValue": true},
                    {"name": "UPDATES_USER_ID", "textValue": "updates-1"},
                    {"name": "REGISTER_UPDATE", "extension": {"status": "OK"}},
                    {"name": "category", "textValue": "design"}
                ]
            }],
            "surface": {"capabilities": [{"name": "actions.capability.SCREEN_OUTPUT"}]}
        }))
        .unwrap()
    }

    #[test]
    fn decodes_intent_context_and_arguments() {
        let envelope = request_json("actions.intent.TEXT");
        let intent = envelope.intent().unwrap();
        assert_eq!(intent, Intent::Text);

        let ctx = envelope.turn_context();
        assert_eq!(ctx.user_id, "user-1");
        assert!(ctx.has_screen);
        assert!(ctx.session.awaiting_category);
        assert!(ctx.user.push_suggestion_asked);

        let request = envelope.turn_request(intent);
        assert_eq!(request.raw_input.as_deref(), Some("most recent"));
        assert_eq!(request.category.as_deref(), Some("design"));
        assert_eq!(request.permission_granted, Some(true));
        assert_eq!(request.updates_user_id.as_deref(), Some("updates-1"));
        assert_eq!(request.update_status.as_deref(), Some("OK"));
    }

    #[test]
    fn unknown_intent_name_is_rejected() {
        let envelope = request_json("tell.joke");
        assert!(envelope.intent().is_none());
    }

    #[test]
    fn ask_serializes_to_expected_inputs() {
        let response = ConversationResponse::ask("Please select a category")
            .with_suggestions(vec!["design".to_owned()]);
        let out = WebhookResponse::from_turn(
            response,
            &SessionState::default(),
            &UserState::default(),
        );
        assert!(out.expect_user_response);
        let inputs = out.expected_inputs.unwrap();
        assert_eq!(inputs[0].possible_intents[0].intent, "actions.intent.TEXT");
        assert_eq!(inputs[0].input_prompt.rich_initial_prompt.suggestions.len(), 1);
        assert!(out.final_response.is_none());
    }

    #[test]
    fn close_serializes_to_final_response() {
        let out = WebhookResponse::from_turn(
            ConversationResponse::close("bye"),
            &SessionState::default(),
            &UserState::default(),
        );
        assert!(!out.expect_user_response);
        assert!(out.expected_inputs.is_none());
        let rich = out.final_response.unwrap().rich_response;
        assert_eq!(
            rich.items[0].simple_response.as_ref().unwrap().text_to_speech,
            "bye"
        );
    }

    #[test]
    fn system_actions_become_possible_intents() {
        let response = ConversationResponse::system_request(SystemAction::RegisterUpdate {
            intent: "tell.tip".to_owned(),
            category: "design".to_owned(),
            frequency: "DAILY".to_owned(),
        });
        let out = WebhookResponse::from_turn(
            response,
            &SessionState::default(),
            &UserState::default(),
        );
        let inputs = out.expected_inputs.unwrap();
        let possible = &inputs[0].possible_intents[0];
        assert_eq!(possible.intent, "actions.intent.REGISTER_UPDATE");
        let data = possible.input_value_data.as_ref().unwrap();
        assert_eq!(data["intent"], "tell.tip");
        assert_eq!(data["arguments"][0]["textValue"], "design");
    }

    #[test]
    fn updated_state_is_round_tripped() {
        let session = SessionState { awaiting_category: true };
        let user = UserState { daily_suggestion_asked: true, push_suggestion_asked: false };
        let out =
            WebhookResponse::from_turn(ConversationResponse::ask("hi"), &session, &user);
        assert_eq!(SessionState::from_token(Some(&out.conversation_token)), session);
        assert_eq!(UserState::from_storage(Some(&out.user_storage)), user);
    }
}
