use serde::Serialize;

/// What a handler asks the platform to do next. "Ask" keeps the conversation
/// open, "close" ends it. The adapter serializes this into the platform's
/// response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationResponse {
    /// Keep the conversation open and wait for the next user input.
    pub expect_user_response: bool,
    /// Spoken/text prompts, in order.
    pub speech: Vec<String>,
    /// Optional visual card (screen surfaces only).
    pub card: Option<TipCard>,
    /// Suggestion chip titles.
    pub suggestions: Vec<String>,
    /// Optional platform system request (permission prompt, update
    /// registration).
    pub system_action: Option<SystemAction>,
}

/// A visual card rendering one tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipCard {
    pub text: String,
    pub button: LinkButton,
}

/// An outbound link button on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButton {
    pub title: String,
    pub url: String,
}

/// Platform system requests a handler can issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SystemAction {
    /// Ask the user for permission to push notifications for `intent`.
    UpdatePermission { intent: String },
    /// Register the user for recurring updates of `intent`.
    RegisterUpdate { intent: String, category: String, frequency: String },
}

impl ConversationResponse {
    /// Keep the conversation open with a prompt.
    #[must_use]
    pub fn ask(prompt: impl Into<String>) -> Self {
        Self {
            expect_user_response: true,
            speech: vec![prompt.into()],
            card: None,
            suggestions: Vec::new(),
            system_action: None,
        }
    }

    /// End the conversation with a final message.
    #[must_use]
    pub fn close(message: impl Into<String>) -> Self {
        Self {
            expect_user_response: false,
            speech: vec![message.into()],
            card: None,
            suggestions: Vec::new(),
            system_action: None,
        }
    }

    /// Keep the conversation open while issuing a platform system request.
    #[must_use]
    pub fn system_request(action: SystemAction) -> Self {
        Self {
            expect_user_response: true,
            speech: Vec::new(),
            card: None,
            suggestions: Vec::new(),
            system_action: Some(action),
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: TipCard) -> Self {
        self.card = Some(card);
        self
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn add_suggestion(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }
}
